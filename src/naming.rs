//! Centralized parsing for the `main-<n>` page-identifier convention.
//!
//! Every page identifier encodes its tree position: a `main-` marker followed
//! by a hyphen-joined sequence of positive integers. The first integer names
//! a top-level section (`main-1` is the distinguished root page), and each
//! further integer descends one level:
//!
//! - `main-1` → the root page (path `/`)
//! - `main-1-2` → second child of the root
//! - `main-1-2-1` → first child of that child
//!
//! A page's parent identifier is obtained by dropping the last numeric
//! segment. This module provides the parsing, ancestry, and validation
//! helpers used consistently by the store, path resolver, and CLI.

/// The distinguished root page identifier. Exempt from name requirements:
/// fixed Chinese name "首頁", empty English name, path `/`.
pub const ROOT_ID: &str = "main-1";

/// Whether `id` is the distinguished root page.
pub fn is_root(id: &str) -> bool {
    id == ROOT_ID
}

/// Parse a top-level section identifier `main-<n>` (exactly one numeric
/// segment). Returns the section number, or `None` for deeper identifiers
/// and anything that doesn't follow the convention.
///
/// - `"main-1"` → `Some(1)`
/// - `"main-3"` → `Some(3)`
/// - `"main-1-2"` → `None` (two segments)
/// - `"about"` → `None`
pub fn section_number(id: &str) -> Option<u32> {
    let rest = id.strip_prefix("main-")?;
    if rest.contains('-') {
        return None;
    }
    rest.parse().ok()
}

/// The raw numeric segments of an identifier, in order. The literal `main`
/// marker is the root anchor, not a segment, so it is dropped:
///
/// - `"main-1-2"` → `["1", "2"]`
/// - `"2-3"` → `["2", "3"]` (bare form, tolerated)
///
/// Segments are returned as raw strings; malformed segments are kept, and
/// callers that care use [`parse_segments`] instead.
pub fn segments(id: &str) -> Vec<&str> {
    let rest = id.strip_prefix("main-").unwrap_or(id);
    if rest.is_empty() {
        return Vec::new();
    }
    rest.split('-').collect()
}

/// Strictly parse an identifier's segments as positive integers.
/// Returns `None` if any segment is non-numeric or zero.
pub fn parse_segments(id: &str) -> Option<Vec<u32>> {
    let parts = segments(id);
    if parts.is_empty() {
        return None;
    }
    let mut numbers = Vec::with_capacity(parts.len());
    for part in parts {
        let n: u32 = part.parse().ok()?;
        if n == 0 {
            return None;
        }
        numbers.push(n);
    }
    Some(numbers)
}

/// Number of hyphen-separated parts in the identifier, including the `main`
/// marker. Templates are applied in ascending order of this count so parents
/// land before their children.
pub fn segment_count(id: &str) -> usize {
    id.split('-').count()
}

/// The parent identifier, obtained by dropping the last segment.
/// Top-level sections (`main-<n>`) have no parent identifier.
///
/// - `"main-1-2-1"` → `Some("main-1-2")`
/// - `"main-2"` → `None`
pub fn parent(id: &str) -> Option<String> {
    let rest = id.strip_prefix("main-")?;
    let (init, _last) = rest.rsplit_once('-')?;
    Some(format!("main-{init}"))
}

/// Whether `id` lies strictly below `ancestor` in the tree, by the prefix
/// rule: every identifier under `X` starts with `X-`.
pub fn is_descendant(id: &str, ancestor: &str) -> bool {
    id.len() > ancestor.len() + 1
        && id.starts_with(ancestor)
        && id.as_bytes()[ancestor.len()] == b'-'
}

/// The chain of accumulated candidate identifiers from the top-level section
/// down to `id` itself, used by the path resolver's ancestry walk:
///
/// - `"main-2-3"` → `["main-2", "main-2-3"]`
/// - `"main-1-1"` → `["main-1", "main-1-1"]`
///
/// The first candidate may be the root (`main-1`); the resolver skips it
/// rather than contributing a path component.
pub fn ancestry_chain(id: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = String::new();
    for segment in segments(id) {
        if current.is_empty() {
            current = format!("main-{segment}");
        } else {
            current.push('-');
            current.push_str(segment);
        }
        chain.push(current.clone());
    }
    chain
}

/// If `id` is a direct child of `parent_id`, return its child number
/// (the last segment). Used for allocating the next child identifier.
pub fn child_number(id: &str, parent_id: &str) -> Option<u32> {
    let rest = id.strip_prefix(parent_id)?.strip_prefix('-')?;
    if rest.contains('-') {
        return None;
    }
    rest.parse().ok()
}

/// Whether `name` is a valid English path segment: non-empty, ASCII letters,
/// digits, hyphen, or underscore only (the `/^[a-zA-Z0-9-_]+$/` rule).
pub fn is_valid_english_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
