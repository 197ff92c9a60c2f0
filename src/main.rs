use chrono::Local;
use clap::{Parser, Subcommand};
use sitespec::storage::FsStorage;
use sitespec::store::PageStore;
use sitespec::types::{Attachment, PageRecord};
use sitespec::{config, export, hierarchy, naming, output, path, template};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "sitespec")]
#[command(about = "Capture a website-build specification as a tree of pages")]
#[command(long_about = "\
Capture a website-build specification as a tree of pages

Page identifiers encode tree position: main-1 is the root page, main-1-2
its second child, main-1-2-1 a grandchild. Each page carries Chinese and
English names, body text, style notes, and attached image files. All data
persists to a single local JSON file after every mutation.

  sitespec add main-1                  # allocate the next child id
  sitespec set main-1-1 --chinese-name 關於 --english-name about
  sitespec show                        # preview the archive layout
  sitespec export-zip                  # one folder per page, readme.md each

Derived paths join the English names along each page's ancestry chain:

  main-1        /
  main-1-1      /about
  main-1-1-2    /about/team

Export artifacts:
  export-json   网站规格_<date>.json   (the raw store, re-importable)
  export-zip    网站需求_<date>.zip    (per-page requirement files)

Run 'sitespec gen-config' to generate a documented sitespec.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Page data file (overrides sitespec.toml)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Template catalog file (overrides sitespec.toml)
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Directory export artifacts are written into (overrides sitespec.toml)
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or update a page (only the given fields change)
    Set {
        /// Page identifier, e.g. main-1-2
        id: String,
        /// Display name (required for non-root pages)
        #[arg(long)]
        chinese_name: Option<String>,
        /// URL path segment: letters, digits, hyphen, underscore
        #[arg(long)]
        english_name: Option<String>,
        /// Body text for the page
        #[arg(long)]
        text: Option<String>,
        /// Layout and style notes
        #[arg(long)]
        style: Option<String>,
        /// Attach a file (repeatable); embedded in the ZIP export
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },
    /// Allocate the next child identifier under a parent and create it
    Add {
        /// Parent page identifier
        parent: String,
    },
    /// Remove a page and its entire subtree
    Remove {
        /// Page identifier
        id: String,
    },
    /// Remove all page data, including the persisted file
    Clear,
    /// Preview the page tree as the archive layout it exports to
    Show,
    /// Validate page names and report path collisions
    Check,
    /// List the template catalog, or one template's page structure
    Templates {
        /// Template key to inspect
        key: Option<String>,
    },
    /// Replace all page data with a template's pages
    Apply {
        /// Template key from the catalog
        key: String,
    },
    /// Write the raw store as a dated JSON document
    ExportJson,
    /// Write the dated requirement archive (one folder per page path)
    ExportZip,
    /// Print a stock sitespec.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Set {
            ref id,
            ref chinese_name,
            ref english_name,
            ref text,
            ref style,
            ref attachments,
        } => {
            let mut store = open_store(&cli)?;
            let mut record = store.get(id).cloned().unwrap_or_default();
            if let Some(name) = chinese_name {
                record.chinese_name = name.clone();
            }
            if let Some(name) = english_name {
                record.english_name = name.clone();
            }
            if let Some(text) = text {
                record.text_content = text.clone();
            }
            if let Some(style) = style {
                record.style_description = style.clone();
            }
            for file_path in attachments {
                let name = file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .ok_or_else(|| format!("not a file path: {}", file_path.display()))?;
                record.files.push(Attachment::File {
                    name,
                    path: file_path.clone(),
                });
            }
            store.update(id, record);
            println!("{id} → {}", path::resolve_path(store.pages(), id));
            if naming::parse_segments(id).is_none() {
                println!("warning: {id} does not follow the main-<n> identifier convention");
            }
            if let Some(parent_id) = naming::parent(id)
                && store.get(&parent_id).is_none()
            {
                println!("note: parent {parent_id} has no record yet");
            }
            for issue in store.validate().iter().filter(|issue| issue.id() == id.as_str()) {
                println!("warning: {issue}");
            }
        }
        Command::Add { ref parent } => {
            let mut store = open_store(&cli)?;
            let child_id = store.next_child_id(parent);
            store.update(&child_id, PageRecord::default());
            println!("Created {child_id}");
            println!("Fill it in with: sitespec set {child_id} --chinese-name ... --english-name ...");
        }
        Command::Remove { ref id } => {
            let mut store = open_store(&cli)?;
            let removed = store.remove(id);
            if removed.is_empty() {
                println!("No such page: {id}");
            } else {
                for removed_id in &removed {
                    println!("Removed {removed_id}");
                }
            }
        }
        Command::Clear => {
            let mut store = open_store(&cli)?;
            store.clear();
            println!("Cleared all page data");
        }
        Command::Show => {
            let store = open_store(&cli)?;
            output::print_tree_output(&hierarchy::build_hierarchy(store.pages()));
        }
        Command::Check => {
            let store = open_store(&cli)?;
            println!("==> Checking {} pages", store.len());
            let issues = store.validate();
            let duplicates = hierarchy::duplicate_paths(store.pages());
            if issues.is_empty() && duplicates.is_empty() {
                println!("==> Content is valid");
            } else {
                output::print_check_output(&issues, &duplicates);
            }
        }
        Command::Templates { ref key } => {
            let catalog = template::load_catalog_or_empty(&templates_path(&cli)?);
            match key {
                None => output::print_templates_output(&catalog),
                Some(key) => match catalog.get(key) {
                    Some(selected) => output::print_template_pages(selected),
                    None => println!("No such template: {key}"),
                },
            }
        }
        Command::Apply { ref key } => {
            let catalog = template::load_catalog_or_empty(&templates_path(&cli)?);
            let selected = catalog
                .get(key)
                .ok_or_else(|| format!("no such template: {key}"))?;
            let mut store = open_store(&cli)?;
            template::apply_template(&mut store, selected);
            println!("Applied 「{}」 ({} pages)", selected.name, selected.pages.len());
        }
        Command::ExportJson => {
            let store = open_store(&cli)?;
            if store.is_empty() {
                return Err(export::ExportError::EmptyStore.into());
            }
            let json = export::export_json(store.pages())?;
            let out_dir = export_dir(&cli)?;
            fs::create_dir_all(&out_dir)?;
            let out = out_dir.join(export::json_export_filename(Local::now().date_naive()));
            fs::write(&out, json)?;
            println!("Exported {}", out.display());
        }
        Command::ExportZip => {
            let store = open_store(&cli)?;
            if store.is_empty() {
                return Err(export::ExportError::EmptyStore.into());
            }
            let tree = hierarchy::build_hierarchy(store.pages());
            let bytes = export::export_archive(&tree)?;
            let out_dir = export_dir(&cli)?;
            fs::create_dir_all(&out_dir)?;
            let out = out_dir.join(export::archive_export_filename(Local::now().date_naive()));
            fs::write(&out, bytes)?;
            println!("Exported {} ({} pages)", out.display(), tree.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the page store from the effective store path.
fn open_store(cli: &Cli) -> Result<PageStore, config::ConfigError> {
    let store_path = match &cli.store {
        Some(path) => path.clone(),
        None => PathBuf::from(load_config()?.store_path),
    };
    Ok(PageStore::load(Box::new(FsStorage::new(store_path))))
}

/// The effective template catalog path.
fn templates_path(cli: &Cli) -> Result<PathBuf, config::ConfigError> {
    match &cli.templates {
        Some(path) => Ok(path.clone()),
        None => Ok(PathBuf::from(load_config()?.templates_path)),
    }
}

/// The effective export directory.
fn export_dir(cli: &Cli) -> Result<PathBuf, config::ConfigError> {
    match &cli.export_dir {
        Some(path) => Ok(path.clone()),
        None => Ok(PathBuf::from(load_config()?.export_dir)),
    }
}

/// Load `sitespec.toml` from the working directory (stock defaults if absent).
fn load_config() -> Result<config::ToolConfig, config::ConfigError> {
    config::load_config(Path::new("."))
}
