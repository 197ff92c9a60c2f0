//! Shared test utilities for the sitespec test suite.
//!
//! Provides compact builders for page records, raw page maps, stores backed
//! by in-memory storage, and enriched pages, so tests can state tree shapes
//! in one line:
//!
//! ```rust
//! let pages = pages_with(&[
//!     ("main-1", "首頁", ""),
//!     ("main-1-1", "關於", "about"),
//! ]);
//! assert_eq!(resolve_path(&pages, "main-1-1"), "/about");
//! ```

use crate::storage::MemoryStorage;
use crate::store::PageStore;
use crate::types::{EnrichedPage, PageRecord};
use indexmap::IndexMap;

/// A record with both names set and everything else empty.
pub fn named_page(chinese: &str, english: &str) -> PageRecord {
    PageRecord {
        chinese_name: chinese.to_string(),
        english_name: english.to_string(),
        ..Default::default()
    }
}

/// A record with names, body text, and style notes.
pub fn page(chinese: &str, english: &str, text: &str, style: &str) -> PageRecord {
    PageRecord {
        chinese_name: chinese.to_string(),
        english_name: english.to_string(),
        text_content: text.to_string(),
        style_description: style.to_string(),
        ..Default::default()
    }
}

/// Build a raw page map from `(id, chineseName, englishName)` triples,
/// preserving the given order.
pub fn pages_with(entries: &[(&str, &str, &str)]) -> IndexMap<String, PageRecord> {
    entries
        .iter()
        .map(|(id, chinese, english)| (id.to_string(), named_page(chinese, english)))
        .collect()
}

/// Build a memory-backed store from `(id, chineseName, englishName)` triples.
pub fn store_with(entries: &[(&str, &str, &str)]) -> PageStore {
    let mut store = PageStore::load(Box::new(MemoryStorage::new()));
    for (id, chinese, english) in entries {
        store.update(id, named_page(chinese, english));
    }
    store
}

/// An enriched page with no attachments.
pub fn enriched(id: &str, title: &str, text: &str, style: &str) -> EnrichedPage {
    EnrichedPage {
        id: id.to_string(),
        title: title.to_string(),
        text_content: text.to_string(),
        style_description: style.to_string(),
        files: Vec::new(),
    }
}
