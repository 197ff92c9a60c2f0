//! Derived page paths.
//!
//! A page's human-facing path is built from the English names along its
//! ancestry chain: the root is `/`, a top-level section is `/<englishName>`,
//! and deeper pages append one component per named ancestor. Resolution is a
//! pure function of a store snapshot: nothing is cached, nothing mutated.
//!
//! Missing ancestor records and missing English names silently truncate
//! their segment from the path rather than failing. Two pages can therefore
//! resolve to the same path; hierarchy views treat that as last-write-wins,
//! and `sitespec check` reports the collision so users can repair it.

use crate::naming;
use crate::types::PageRecord;
use indexmap::IndexMap;

/// Resolve the hierarchical path for a page identifier against a store
/// snapshot.
///
/// - `main-1` → `/`
/// - `main-<n>` (n ≠ 1) → `/<englishName>` if the record has one, else `/`
/// - deeper identifiers → one component per ancestor with a non-empty
///   English name, walked from the top-level section down
pub fn resolve_path(pages: &IndexMap<String, PageRecord>, id: &str) -> String {
    if naming::is_root(id) {
        return "/".to_string();
    }

    if naming::section_number(id).is_some() {
        if let Some(record) = pages.get(id)
            && !record.english_name.is_empty()
        {
            return format!("/{}", record.english_name);
        }
        return "/".to_string();
    }

    let mut components = Vec::new();
    for candidate in naming::ancestry_chain(id) {
        // The root contributes no component; it is the `/` prefix itself.
        if naming::is_root(&candidate) {
            continue;
        }
        if let Some(record) = pages.get(candidate.as_str())
            && !record.english_name.is_empty()
        {
            components.push(record.english_name.clone());
        }
    }

    if components.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", components.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{named_page, pages_with};

    #[test]
    fn root_path_is_slash_regardless_of_store() {
        assert_eq!(resolve_path(&IndexMap::new(), "main-1"), "/");

        let mut pages = pages_with(&[("main-1-1", "關於", "about")]);
        pages.insert("main-1".into(), named_page("首頁", "ignored"));
        assert_eq!(resolve_path(&pages, "main-1"), "/");
    }

    #[test]
    fn section_path_uses_own_english_name() {
        let pages = pages_with(&[("main-2", "部落格", "blog")]);
        assert_eq!(resolve_path(&pages, "main-2"), "/blog");
    }

    #[test]
    fn section_without_name_falls_back_to_root() {
        let pages = pages_with(&[("main-2", "部落格", "")]);
        assert_eq!(resolve_path(&pages, "main-2"), "/");
        assert_eq!(resolve_path(&IndexMap::new(), "main-3"), "/");
    }

    #[test]
    fn child_of_root_is_single_component() {
        let pages = pages_with(&[("main-1", "首頁", ""), ("main-1-1", "關於", "about")]);
        assert_eq!(resolve_path(&pages, "main-1-1"), "/about");
    }

    #[test]
    fn fully_named_chain_joins_all_components() {
        let pages = pages_with(&[
            ("main-1", "首頁", ""),
            ("main-1-2", "產品", "products"),
            ("main-1-2-1", "型錄", "catalog"),
            ("main-1-2-1-3", "規格", "specs"),
        ]);
        assert_eq!(resolve_path(&pages, "main-1-2-1-3"), "/products/catalog/specs");
    }

    #[test]
    fn missing_ancestor_record_truncates_silently() {
        // main-1-2 has no record at all; its segment just disappears
        let pages = pages_with(&[("main-1-2-1", "型錄", "catalog")]);
        assert_eq!(resolve_path(&pages, "main-1-2-1"), "/catalog");
    }

    #[test]
    fn unnamed_ancestor_truncates_silently() {
        let pages = pages_with(&[
            ("main-1-2", "產品", ""),
            ("main-1-2-1", "型錄", "catalog"),
        ]);
        assert_eq!(resolve_path(&pages, "main-1-2-1"), "/catalog");
    }

    #[test]
    fn all_segments_unresolvable_gives_root() {
        let pages = pages_with(&[("main-1-2", "產品", "")]);
        assert_eq!(resolve_path(&pages, "main-1-2-9"), "/");
    }

    #[test]
    fn non_root_section_contributes_a_component_for_descendants() {
        let pages = pages_with(&[
            ("main-2", "部落格", "blog"),
            ("main-2-1", "貼文", "posts"),
        ]);
        assert_eq!(resolve_path(&pages, "main-2-1"), "/blog/posts");
    }

    #[test]
    fn resolution_is_pure() {
        let pages = pages_with(&[("main-1-1", "關於", "about")]);
        let before = pages.clone();
        let _ = resolve_path(&pages, "main-1-1");
        assert_eq!(pages, before);
    }
}
