//! The page store: a flat mapping from page identifier to page record.
//!
//! The store is the single owner of all page data. It is mutated through
//! [`PageStore::update`] and [`PageStore::clear`] (plus
//! [`PageStore::remove`], which is a cascading update), and every mutation
//! persists synchronously through the injected [`Storage`] collaborator
//! before returning, so memory and persisted state never diverge for longer
//! than one mutation.
//!
//! Persistence is deliberately forgiving: an absent or corrupt blob loads as
//! an empty store, and a failed write degrades the store to in-memory-only.
//! Both cases are logged and swallowed; losing the ability to persist must
//! never block editing.
//!
//! Insertion order of the map is significant: the JSON export serializes
//! keys in the order pages were first created, matching the historical
//! object-key behaviour of the persisted format.

use crate::naming;
use crate::storage::Storage;
use crate::types::PageRecord;
use indexmap::IndexMap;
use std::fmt;

/// Issues found by [`PageStore::validate`]. These are reported to the user
/// but never block editing or exporting other pages.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// Non-root page with no Chinese name.
    MissingChineseName { id: String },
    /// Non-root page with no English name (it will be excluded from
    /// hierarchy views and the archive export).
    MissingEnglishName { id: String },
    /// English name contains characters outside letters/digits/hyphen/underscore.
    InvalidEnglishName { id: String, name: String },
}

impl ValidationIssue {
    pub fn id(&self) -> &str {
        match self {
            ValidationIssue::MissingChineseName { id }
            | ValidationIssue::MissingEnglishName { id }
            | ValidationIssue::InvalidEnglishName { id, .. } => id,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingChineseName { id } => {
                write!(f, "{id}: 中文名稱是必填的")
            }
            ValidationIssue::MissingEnglishName { id } => {
                write!(f, "{id}: 英文名稱是必填的")
            }
            ValidationIssue::InvalidEnglishName { id, name } => {
                write!(f, "{id}: 英文名稱「{name}」只能包含英文、數字、連字符或底線")
            }
        }
    }
}

/// Flat page mapping with synchronous persistence.
pub struct PageStore {
    pages: IndexMap<String, PageRecord>,
    storage: Box<dyn Storage>,
}

impl PageStore {
    /// Load the store from its storage collaborator.
    ///
    /// Absent or corrupt data is treated as an empty store; parse failures
    /// are logged and swallowed. Legacy `pageDescription` fields are folded
    /// into `textContent` here, once, so read paths never branch on them.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let pages = match storage.read() {
            Ok(Some(blob)) => match serde_json::from_str::<IndexMap<String, PageRecord>>(&blob) {
                Ok(pages) => pages,
                Err(e) => {
                    tracing::warn!("persisted page data is corrupt, starting empty: {e}");
                    IndexMap::new()
                }
            },
            Ok(None) => IndexMap::new(),
            Err(e) => {
                tracing::warn!("failed to read persisted page data, starting empty: {e}");
                IndexMap::new()
            }
        };

        let mut store = Self { pages, storage };
        let migrated = store.migrate_legacy_fields();
        if migrated > 0 {
            tracing::debug!("migrated pageDescription on {migrated} page(s)");
        }
        store
    }

    /// Fold the legacy `pageDescription` field into `textContent`.
    /// Returns the number of records touched.
    fn migrate_legacy_fields(&mut self) -> usize {
        let mut migrated = 0;
        for record in self.pages.values_mut() {
            if let Some(description) = record.page_description.take() {
                if record.text_content.is_empty() {
                    record.text_content = description;
                }
                migrated += 1;
            }
        }
        migrated
    }

    pub fn get(&self, id: &str) -> Option<&PageRecord> {
        self.pages.get(id)
    }

    /// The full mapping, in insertion order.
    pub fn pages(&self) -> &IndexMap<String, PageRecord> {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// The single update entry point. Creates the record on first use,
    /// replaces it otherwise, and persists before returning.
    ///
    /// The root page is normalized on the way in: its Chinese name is fixed
    /// to "首頁" and its English name is always empty.
    pub fn update(&mut self, id: &str, mut record: PageRecord) {
        if id.is_empty() {
            tracing::warn!("ignoring update with empty page id");
            return;
        }
        if naming::is_root(id) {
            record.chinese_name = "首頁".to_string();
            record.english_name = String::new();
        }
        self.pages.insert(id.to_string(), record);
        self.persist();
    }

    /// Remove a page and cascade over every identifier whose ancestry chain
    /// includes it. Returns the removed identifiers, target first.
    pub fn remove(&mut self, id: &str) -> Vec<String> {
        let mut removed = Vec::new();
        if self.pages.shift_remove(id).is_some() {
            removed.push(id.to_string());
        }
        let descendants: Vec<String> = self
            .pages
            .keys()
            .filter(|key| naming::is_descendant(key, id))
            .cloned()
            .collect();
        for key in descendants {
            self.pages.shift_remove(&key);
            removed.push(key);
        }
        if !removed.is_empty() {
            self.persist();
        }
        removed
    }

    /// Empty the store and remove the persisted blob.
    pub fn clear(&mut self) {
        self.pages.clear();
        if let Err(e) = self.storage.remove() {
            tracing::warn!("failed to remove persisted page data: {e}");
        }
    }

    /// Allocate the next child identifier under `parent_id`: one past the
    /// highest existing direct-child number, starting at 1.
    pub fn next_child_id(&self, parent_id: &str) -> String {
        let max = self
            .pages
            .keys()
            .filter_map(|key| naming::child_number(key, parent_id))
            .max()
            .unwrap_or(0);
        format!("{parent_id}-{}", max + 1)
    }

    /// Report name-field issues across the store. Root is exempt.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (id, record) in &self.pages {
            if naming::is_root(id) {
                continue;
            }
            if record.chinese_name.is_empty() {
                issues.push(ValidationIssue::MissingChineseName { id: id.clone() });
            }
            if record.english_name.is_empty() {
                issues.push(ValidationIssue::MissingEnglishName { id: id.clone() });
            } else if !naming::is_valid_english_name(&record.english_name) {
                issues.push(ValidationIssue::InvalidEnglishName {
                    id: id.clone(),
                    name: record.english_name.clone(),
                });
            }
        }
        issues
    }

    /// Serialize and write through the storage collaborator. Failures are
    /// logged; the store keeps operating in memory.
    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.pages) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("failed to serialize page data: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.write(&blob) {
            tracing::warn!("failed to persist page data: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FsStorage, MemoryStorage};
    use crate::test_helpers::{named_page, store_with};

    fn empty_store() -> PageStore {
        PageStore::load(Box::new(MemoryStorage::new()))
    }

    // =========================================================================
    // Load behaviour
    // =========================================================================

    #[test]
    fn absent_blob_loads_empty() {
        let store = empty_store();
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let store = PageStore::load(Box::new(MemoryStorage::with_blob("not json")));
        assert!(store.is_empty());
    }

    #[test]
    fn valid_blob_loads_records() {
        let blob = r#"{"main-1": {"chineseName": "首頁", "textContent": "Hi"}}"#;
        let store = PageStore::load(Box::new(MemoryStorage::with_blob(blob)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("main-1").unwrap().text_content, "Hi");
    }

    #[test]
    fn legacy_page_description_migrates_to_text_content() {
        let blob = r#"{"main-1-1": {"englishName": "about", "pageDescription": "old body"}}"#;
        let store = PageStore::load(Box::new(MemoryStorage::with_blob(blob)));
        let record = store.get("main-1-1").unwrap();
        assert_eq!(record.text_content, "old body");
        assert_eq!(record.page_description, None);
    }

    #[test]
    fn migration_prefers_existing_text_content() {
        let blob =
            r#"{"main-1-1": {"textContent": "new", "pageDescription": "old"}}"#;
        let store = PageStore::load(Box::new(MemoryStorage::with_blob(blob)));
        let record = store.get("main-1-1").unwrap();
        assert_eq!(record.text_content, "new");
        assert_eq!(record.page_description, None);
    }

    // =========================================================================
    // Update
    // =========================================================================

    #[test]
    fn update_creates_then_replaces() {
        let mut store = empty_store();
        store.update("main-1-1", named_page("關於", "about"));
        assert_eq!(store.get("main-1-1").unwrap().english_name, "about");

        let mut replacement = named_page("關於我們", "about-us");
        replacement.text_content = "body".into();
        store.update("main-1-1", replacement);
        assert_eq!(store.get("main-1-1").unwrap().english_name, "about-us");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_with_empty_id_is_ignored() {
        let mut store = empty_store();
        store.update("", named_page("x", "x"));
        assert!(store.is_empty());
    }

    #[test]
    fn root_names_are_normalized() {
        let mut store = empty_store();
        store.update("main-1", named_page("亂改的名字", "should-be-dropped"));
        let root = store.get("main-1").unwrap();
        assert_eq!(root.chinese_name, "首頁");
        assert_eq!(root.english_name, "");
    }

    #[test]
    fn update_persists_synchronously() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("pages.json");
        let mut store = PageStore::load(Box::new(FsStorage::new(&path)));
        store.update("main-1", PageRecord::default());
        assert!(path.exists());

        let reloaded = PageStore::load(Box::new(FsStorage::new(&path)));
        assert_eq!(reloaded.len(), 1);
    }

    // =========================================================================
    // Remove / clear
    // =========================================================================

    #[test]
    fn remove_cascades_to_descendants() {
        let mut store = store_with(&[
            ("main-1", "", ""),
            ("main-1-1", "產品", "products"),
            ("main-1-1-1", "型錄", "catalog"),
            ("main-1-1-2", "報價", "pricing"),
            ("main-1-2", "關於", "about"),
        ]);
        let removed = store.remove("main-1-1");
        assert_eq!(
            removed,
            vec!["main-1-1", "main-1-1-1", "main-1-1-2"]
        );
        assert!(store.get("main-1-1").is_none());
        assert!(store.get("main-1-1-1").is_none());
        assert!(store.get("main-1-2").is_some());
    }

    #[test]
    fn remove_does_not_touch_similar_prefixes() {
        let mut store = store_with(&[
            ("main-1-1", "一", "one"),
            ("main-1-12", "十二", "twelve"),
        ]);
        store.remove("main-1-1");
        assert!(store.get("main-1-12").is_some());
    }

    #[test]
    fn remove_missing_id_removes_nothing() {
        let mut store = store_with(&[("main-1-1", "一", "one")]);
        assert!(store.remove("main-1-9").is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_empties_store() {
        let mut store = store_with(&[("main-1", "", ""), ("main-1-1", "一", "one")]);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn clear_removes_persisted_blob() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("pages.json");
        let mut store = PageStore::load(Box::new(FsStorage::new(&path)));
        store.update("main-1", PageRecord::default());
        assert!(path.exists());

        store.clear();
        assert!(!path.exists());
    }

    // =========================================================================
    // Child-id allocation
    // =========================================================================

    #[test]
    fn first_child_id_is_one() {
        let store = store_with(&[("main-1", "", "")]);
        assert_eq!(store.next_child_id("main-1"), "main-1-1");
    }

    #[test]
    fn next_child_id_is_max_plus_one() {
        let store = store_with(&[
            ("main-1-1", "一", "one"),
            ("main-1-3", "三", "three"),
            ("main-1-3-9", "深", "deep"),
        ]);
        assert_eq!(store.next_child_id("main-1"), "main-1-4");
        assert_eq!(store.next_child_id("main-1-3"), "main-1-3-10");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_reports_missing_names() {
        let mut store = empty_store();
        store.update("main-1-1", PageRecord::default());
        let issues = store.validate();
        assert!(issues.contains(&ValidationIssue::MissingChineseName {
            id: "main-1-1".into()
        }));
        assert!(issues.contains(&ValidationIssue::MissingEnglishName {
            id: "main-1-1".into()
        }));
    }

    #[test]
    fn validate_reports_bad_english_name() {
        let mut store = empty_store();
        store.update("main-1-1", named_page("關於", "about us"));
        let issues = store.validate();
        assert_eq!(
            issues,
            vec![ValidationIssue::InvalidEnglishName {
                id: "main-1-1".into(),
                name: "about us".into(),
            }]
        );
    }

    #[test]
    fn validate_exempts_root() {
        let mut store = empty_store();
        store.update("main-1", PageRecord::default());
        assert!(store.validate().is_empty());
    }
}
