//! The hierarchy view: resolved path → enriched page record.
//!
//! This is the shape both exporters and the tree display consume. It is a
//! snapshot, not a live view: callers recompute after any mutation. Trees
//! are small, so recomputation on read is fine.
//!
//! Exclusion rule: a non-root page with no English name of its own is left
//! out entirely. Its subtree may still appear, because the ancestry walk in
//! [`crate::path::resolve_path`] tolerates the gap and descendants that are
//! independently named land under the nearest resolvable path.

use crate::naming;
use crate::path::resolve_path;
use crate::types::{EnrichedPage, PageRecord};
use indexmap::IndexMap;

/// Build the path → page mapping for every page with a resolvable path.
///
/// The root's title is forced to "首頁" regardless of the stored name; other
/// pages use their Chinese name (empty string when unset). When two pages
/// resolve to the same path, the later store entry wins.
pub fn build_hierarchy(pages: &IndexMap<String, PageRecord>) -> IndexMap<String, EnrichedPage> {
    let mut result = IndexMap::new();

    for (id, record) in pages {
        if !naming::is_root(id) && record.english_name.is_empty() {
            continue;
        }

        let path = resolve_path(pages, id);
        let title = if naming::is_root(id) {
            "首頁".to_string()
        } else {
            record.chinese_name.clone()
        };

        result.insert(
            path,
            EnrichedPage {
                id: id.clone(),
                title,
                text_content: record.text_content.clone(),
                style_description: record.style_description.clone(),
                files: record.files.clone(),
            },
        );
    }

    result
}

/// Group page identifiers by resolved path and return the collisions.
/// Used by `sitespec check` to surface the silent-truncation limitation.
pub fn duplicate_paths(pages: &IndexMap<String, PageRecord>) -> Vec<(String, Vec<String>)> {
    let mut by_path: IndexMap<String, Vec<String>> = IndexMap::new();
    for (id, record) in pages {
        if !naming::is_root(id) && record.english_name.is_empty() {
            continue;
        }
        by_path
            .entry(resolve_path(pages, id))
            .or_default()
            .push(id.clone());
    }
    by_path
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{page, pages_with};

    #[test]
    fn root_title_is_forced() {
        let mut pages = pages_with(&[]);
        pages.insert("main-1".into(), page("不是首頁", "", "Hi", ""));
        let hierarchy = build_hierarchy(&pages);
        let root = &hierarchy["/"];
        assert_eq!(root.title, "首頁");
        assert_eq!(root.text_content, "Hi");
        assert_eq!(root.id, "main-1");
    }

    #[test]
    fn nameless_non_root_pages_are_excluded() {
        let pages = pages_with(&[
            ("main-1", "首頁", ""),
            ("main-1-1", "關於", "about"),
            ("main-1-2", "無名", ""),
        ]);
        let hierarchy = build_hierarchy(&pages);
        assert_eq!(hierarchy.len(), 2);
        assert!(hierarchy.contains_key("/"));
        assert!(hierarchy.contains_key("/about"));
    }

    #[test]
    fn descendants_of_excluded_pages_still_appear() {
        // main-1-2 has no English name, but its child does: the child lands
        // under the truncated path.
        let pages = pages_with(&[
            ("main-1-2", "無名", ""),
            ("main-1-2-1", "型錄", "catalog"),
        ]);
        let hierarchy = build_hierarchy(&pages);
        assert!(hierarchy.contains_key("/catalog"));
        assert_eq!(hierarchy["/catalog"].id, "main-1-2-1");
    }

    #[test]
    fn titles_fall_back_to_empty() {
        let pages = pages_with(&[("main-1-1", "", "about")]);
        let hierarchy = build_hierarchy(&pages);
        assert_eq!(hierarchy["/about"].title, "");
    }

    #[test]
    fn colliding_paths_last_write_wins() {
        let pages = pages_with(&[
            ("main-1-1", "第一", "same"),
            ("main-1-2", "第二", "same"),
        ]);
        let hierarchy = build_hierarchy(&pages);
        assert_eq!(hierarchy.len(), 1);
        assert_eq!(hierarchy["/same"].id, "main-1-2");
    }

    #[test]
    fn duplicate_paths_reports_collisions() {
        let pages = pages_with(&[
            ("main-1-1", "第一", "same"),
            ("main-1-2", "第二", "same"),
            ("main-1-3", "第三", "unique"),
        ]);
        let dups = duplicate_paths(&pages);
        assert_eq!(
            dups,
            vec![(
                "/same".to_string(),
                vec!["main-1-1".to_string(), "main-1-2".to_string()]
            )]
        );
    }

    #[test]
    fn empty_store_builds_empty_hierarchy() {
        assert!(build_hierarchy(&IndexMap::new()).is_empty());
    }
}
