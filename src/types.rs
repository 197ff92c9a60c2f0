//! Shared types for the page store and its derived views.
//!
//! `PageRecord` is the persisted shape: field names serialize in camelCase
//! so the on-disk store and template catalogs stay byte-compatible with the
//! historical format. `EnrichedPage` is the derived shape produced by the
//! hierarchy builder and consumed by the exporters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One page of the website specification, keyed in the store by its
/// `main-<n>` identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRecord {
    /// Display name. Required for non-root pages; the root is fixed to "首頁".
    pub chinese_name: String,
    /// URL-safe path segment (letters, digits, hyphen, underscore).
    /// Required for non-root pages; empty for the root.
    pub english_name: String,
    /// Free-form body text for the page.
    pub text_content: String,
    /// Legacy alias for `text_content`. Accepted on load, folded into
    /// `text_content` by [`crate::store::PageStore::load`], never written back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_description: Option<String>,
    /// Free-form layout/style notes.
    pub style_description: String,
    /// Ordered attachments for the page.
    pub files: Vec<Attachment>,
}

/// An attached file: either a reference to a blob on disk (written into the
/// archive as-is) or an inline `{name, content}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attachment {
    /// A file on disk. The archive exporter reads and embeds its raw bytes.
    File { name: String, path: PathBuf },
    /// An inline attachment; `content` defaults to empty.
    Inline {
        name: String,
        #[serde(default)]
        content: String,
    },
}

impl Attachment {
    /// The filename the attachment is written under in the archive.
    pub fn name(&self) -> &str {
        match self {
            Attachment::File { name, .. } => name,
            Attachment::Inline { name, .. } => name,
        }
    }
}

/// A page record enriched for hierarchy-based views: keyed by resolved path,
/// with the display title forced for the root and the original identifier
/// carried for traceability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPage {
    /// Original store identifier.
    pub id: String,
    /// "首頁" for the root; the page's Chinese name (possibly empty) otherwise.
    pub title: String,
    pub text_content: String,
    pub style_description: String,
    pub files: Vec<Attachment>,
}
