//! CLI output formatting.
//!
//! Display is structure-first: every page leads with the archive location
//! its descriptor will occupy (`<path>/readme.md`), followed by its title
//! and attachment count. The same ordering is used everywhere paths are
//! listed (root path first, the rest lexicographic) so the preview matches
//! the archive layout users will download.
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::store::ValidationIssue;
use crate::template::Template;
use crate::types::EnrichedPage;
use indexmap::IndexMap;

/// Paths in display order: `/` first, the rest lexicographic.
fn sorted_paths(hierarchy: &IndexMap<String, EnrichedPage>) -> Vec<&str> {
    let mut paths: Vec<&str> = hierarchy.keys().map(String::as_str).collect();
    paths.sort_by(|a, b| match (*a == "/", *b == "/") {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.cmp(b),
    });
    paths
}

/// The descriptor location for a resolved path.
fn display_path(path: &str) -> String {
    if path == "/" {
        "/readme.md".to_string()
    } else {
        format!("{path}/readme.md")
    }
}

/// Format the hierarchy as the archive layout it exports to.
///
/// ```text
/// Pages
/// /readme.md - 首頁
/// /about/readme.md - 關於 (含 2 個檔案)
///
/// 2 pages
/// ```
pub fn format_tree_output(hierarchy: &IndexMap<String, EnrichedPage>) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    for path in sorted_paths(hierarchy) {
        let page = &hierarchy[path];
        let title = if page.title.is_empty() {
            "無標題"
        } else {
            &page.title
        };
        let mut line = format!("{} - {}", display_path(path), title);
        if !page.files.is_empty() {
            line.push_str(&format!(" (含 {} 個檔案)", page.files.len()));
        }
        lines.push(line);
    }

    lines.push(String::new());
    lines.push(format!("{} pages", hierarchy.len()));
    lines
}

/// Format validation findings: name issues first, then path collisions.
/// Returns no lines when the content is clean.
pub fn format_check_output(
    issues: &[ValidationIssue],
    duplicates: &[(String, Vec<String>)],
) -> Vec<String> {
    let mut lines = Vec::new();
    for issue in issues {
        lines.push(issue.to_string());
    }
    for (path, ids) in duplicates {
        lines.push(format!("路徑衝突 {}: {}", path, ids.join(", ")));
    }
    lines
}

/// Format the template catalog listing.
///
/// ```text
/// Templates
/// corporate  企業網站 - 公司網站 (包含 4 個頁面)
/// ```
pub fn format_templates_output(catalog: &IndexMap<String, Template>) -> Vec<String> {
    let mut lines = vec!["Templates".to_string()];
    for (key, template) in catalog {
        let mut line = format!("{key}  {}", template.name);
        if !template.description.is_empty() {
            line.push_str(&format!(" - {}", template.description));
        }
        line.push_str(&format!(" (包含 {} 個頁面)", template.pages.len()));
        lines.push(line);
    }
    lines
}

/// Format a template's page structure: `中文名稱 (/englishName)` per page.
pub fn format_template_pages(template: &Template) -> Vec<String> {
    template
        .pages
        .iter()
        .map(|page| format!("• {} (/{})", page.chinese_name, page.english_name))
        .collect()
}

pub fn print_tree_output(hierarchy: &IndexMap<String, EnrichedPage>) {
    for line in format_tree_output(hierarchy) {
        println!("{line}");
    }
}

pub fn print_check_output(issues: &[ValidationIssue], duplicates: &[(String, Vec<String>)]) {
    for line in format_check_output(issues, duplicates) {
        println!("{line}");
    }
}

pub fn print_templates_output(catalog: &IndexMap<String, Template>) {
    for line in format_templates_output(catalog) {
        println!("{line}");
    }
}

pub fn print_template_pages(template: &Template) {
    for line in format_template_pages(template) {
        println!("{line}");
    }
}
