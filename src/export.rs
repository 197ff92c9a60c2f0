//! Export serializers: the raw-store JSON document and the per-page
//! requirement archive.
//!
//! Two independent consumers of the store:
//!
//! - **JSON export** serializes the entire raw mapping, pretty-printed, keys
//!   in store insertion order. No filtering, no path resolution: a faithful
//!   dump that re-imports losslessly.
//! - **Archive export** consumes the hierarchy view and produces a ZIP with
//!   one folder per resolved path, a generated `readme.md` requirement file
//!   in each, and every attachment written alongside its page's descriptor.
//!
//! The archive is materialized entirely in memory and handed back as one
//! byte vector, so a failure mid-generation surfaces a single error and
//! leaves no partial artifact on disk.

use crate::types::{Attachment, EnrichedPage, PageRecord};
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::fs;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("no pages to export")]
    EmptyStore,
}

/// Serialize the raw store to a pretty-printed JSON document.
///
/// Key order matches the store's insertion order, so the output is stable
/// for a given store and parses back to an equal mapping.
pub fn export_json(pages: &IndexMap<String, PageRecord>) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(pages)?)
}

/// Render the generated `readme.md` requirement descriptor for one page.
///
/// Four sections in fixed order: title heading, 文字內容, 排版與樣式描述,
/// and 相關圖片 (a bullet per attachment name). Empty fields fall back to
/// their placeholder strings.
pub fn render_descriptor(page: &EnrichedPage) -> String {
    let title = if page.title.is_empty() {
        "無標題"
    } else {
        &page.title
    };
    let text = if page.text_content.is_empty() {
        "無文字內容"
    } else {
        &page.text_content
    };
    let style = if page.style_description.is_empty() {
        "無樣式描述"
    } else {
        &page.style_description
    };
    let files = if page.files.is_empty() {
        "無圖片素材".to_string()
    } else {
        page.files
            .iter()
            .map(|f| format!("- {}", f.name()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "# {title}\n\n## 文字內容\n{text}\n\n## 排版與樣式描述\n{style}\n\n## 相關圖片\n{files}"
    )
}

/// The archive folder for a resolved path: the root maps to the archive
/// root, everything else to the path without its leading slash.
fn folder_for(path: &str) -> &str {
    if path == "/" {
        ""
    } else {
        path.trim_start_matches('/')
    }
}

/// Build the requirement archive from a hierarchy snapshot. Returns the
/// complete ZIP as bytes.
pub fn export_archive(
    hierarchy: &IndexMap<String, EnrichedPage>,
) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (path, page) in hierarchy {
        let folder = folder_for(path);
        let readme = if folder.is_empty() {
            "readme.md".to_string()
        } else {
            format!("{folder}/readme.md")
        };
        zip.start_file(readme, options)?;
        zip.write_all(render_descriptor(page).as_bytes())?;

        for attachment in &page.files {
            let entry = if folder.is_empty() {
                attachment.name().to_string()
            } else {
                format!("{folder}/{}", attachment.name())
            };
            zip.start_file(entry, options)?;
            match attachment {
                Attachment::File { path, .. } => {
                    let bytes = fs::read(path)?;
                    zip.write_all(&bytes)?;
                }
                Attachment::Inline { content, .. } => {
                    zip.write_all(content.as_bytes())?;
                }
            }
        }
    }

    Ok(zip.finish()?.into_inner())
}

/// JSON export artifact name for the given date: `网站规格_<ISO-date>.json`.
pub fn json_export_filename(date: NaiveDate) -> String {
    format!("网站规格_{}.json", date.format("%Y-%m-%d"))
}

/// Archive export artifact name for the given date: `网站需求_<ISO-date>.zip`.
pub fn archive_export_filename(date: NaiveDate) -> String {
    format!("网站需求_{}.zip", date.format("%Y-%m-%d"))
}
