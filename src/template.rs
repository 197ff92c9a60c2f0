//! Template catalogs: predefined page trees applied onto the store.
//!
//! A catalog is a JSON document mapping template keys to `{name,
//! description, pages}`. Applying a template clears the store, then feeds
//! every template page through the store's normal update entry point in
//! ascending identifier-depth order, so parents always land before their
//! children regardless of the order pages appear in the catalog.
//!
//! A catalog that fails to load is logged and treated as empty; template
//! selection simply has nothing to offer while editing continues to work.

use crate::naming;
use crate::store::PageStore;
use crate::types::PageRecord;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One predefined website structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pages: Vec<TemplatePage>,
}

/// A page entry within a template. Attachments are not templated; applied
/// pages start with an empty file list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatePage {
    pub id: String,
    pub chinese_name: String,
    pub english_name: String,
    pub text_content: String,
    pub style_description: String,
}

/// Load a template catalog from a JSON file, preserving catalog order.
pub fn load_catalog(path: &Path) -> Result<IndexMap<String, Template>, TemplateError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a catalog, degrading to empty on failure (logged, not surfaced).
pub fn load_catalog_or_empty(path: &Path) -> IndexMap<String, Template> {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("failed to load templates from {}: {e}", path.display());
            IndexMap::new()
        }
    }
}

/// Replace the store contents with a template's pages.
///
/// Existing data is cleared first. Pages are applied in ascending
/// identifier-segment-count order (stable, so catalog order is preserved
/// among pages at the same depth).
pub fn apply_template(store: &mut PageStore, template: &Template) {
    store.clear();

    let mut pages: Vec<&TemplatePage> = template.pages.iter().collect();
    pages.sort_by_key(|page| naming::segment_count(&page.id));

    for page in pages {
        store.update(
            &page.id,
            PageRecord {
                chinese_name: page.chinese_name.clone(),
                english_name: page.english_name.clone(),
                text_content: page.text_content.clone(),
                page_description: None,
                style_description: page.style_description.clone(),
                files: Vec::new(),
            },
        );
    }
}
