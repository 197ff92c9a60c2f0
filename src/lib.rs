//! # sitespec
//!
//! A CLI tool for capturing hierarchical website-build specifications.
//! The unit of work is a tree of "pages" (each with Chinese/English names,
//! body text, style notes, and attached image files) persisted as a single
//! JSON document and exportable as raw JSON or as a ZIP of per-page
//! `readme.md` requirement files.
//!
//! # Architecture: Store → Derived Views → Exports
//!
//! All data lives in one flat mapping from page identifier to page record.
//! Everything else is derived from it on demand:
//!
//! ```text
//! 1. Store      id → PageRecord        (flat map, synchronous persistence)
//! 2. Hierarchy  path → EnrichedPage    (derived view, recomputed on read)
//! 3. Export     JSON document / ZIP    (serializers over 1 and 2)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **One write path**: the store has a single update entry point and a
//!   single clear entry point; both persist before returning, so memory and
//!   disk never diverge for longer than one mutation.
//! - **Cheap consistency**: derived paths are recomputed from the flat map
//!   on every read instead of being maintained incrementally, so renaming an
//!   ancestor can never leave a stale descendant path behind.
//! - **Testability**: path resolution and both exporters are pure functions
//!   of a store snapshot.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | The flat page mapping: update, cascade remove, clear, validation |
//! | [`storage`] | Blob persistence collaborator (file-backed and in-memory) |
//! | [`naming`] | `main-<n>` identifier convention: parsing, ancestry, validation |
//! | [`path`] | Derives the URL-like path for an identifier from its ancestry chain |
//! | [`hierarchy`] | Builds the path → enriched-record view the exporters consume |
//! | [`export`] | JSON document and ZIP archive serializers, artifact names |
//! | [`template`] | Template catalogs: load and apply predefined page trees |
//! | [`config`] | `sitespec.toml` loading and validation |
//! | [`types`] | Shared serialized types (`PageRecord`, `Attachment`, `EnrichedPage`) |
//! | [`output`] | CLI output formatting: archive-layout display of the tree |
//!
//! # Design Decisions
//!
//! ## Insertion-Ordered Store
//!
//! The store is an [`indexmap::IndexMap`], not a `HashMap` or `BTreeMap`.
//! The JSON export contract is that key order matches the order pages were
//! first created: the historical persisted format behaved like a JS object,
//! and re-exports must stay byte-stable for unchanged stores.
//!
//! ## Paths Truncate, Never Fail
//!
//! A missing ancestor record or missing English name drops that segment from
//! the derived path instead of erroring. This keeps partially-filled trees
//! exportable at every moment, at the cost of possible path collisions,
//! which resolve last-write-wins and are reported by `sitespec check`.
//!
//! ## Forgiving Persistence
//!
//! Absent or corrupt persisted data loads as an empty store; failed writes
//! degrade to in-memory-only. Both are logged and swallowed: losing the
//! ability to persist must never block editing or exporting.

pub mod config;
pub mod export;
pub mod hierarchy;
pub mod naming;
pub mod output;
pub mod path;
pub mod storage;
pub mod store;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
