//! Indexing, caching, and querying of the a11y pattern catalog.
//!
//! This crate reads a content repository through
//! [`a11y_core::ContentSource`], builds one [`PatternIndex`] per stack, and
//! answers the three catalog queries.
//!
//! # Modules
//!
//! - [`layout`]: Where a stack's files live
//! - [`component`]: Component frontmatter → `PatternSummary`
//! - [`selection`]: `patterns.json` excerpt decoding
//! - [`fingerprint`]: Content-derived `catalog_revision`
//! - [`index`]: Repository indexer
//! - [`cache`]: TTL-bounded per-stack index cache
//! - [`query`]: `list_patterns`, `get_pattern`, `get_global_rules`
//! - [`catalog`]: `PatternCatalog` facade

pub mod cache;
pub mod catalog;
pub mod component;
pub mod fingerprint;
pub mod index;
pub mod layout;
pub mod query;
pub mod selection;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types
pub use cache::IndexCache;
pub use catalog::PatternCatalog;
pub use component::PatternSummary;
pub use index::{CacheMeta, PatternIndex, build_index};
pub use layout::StackLayout;
pub use query::{
    CONTRACT_VERSION, Envelope, GetGlobalRulesArgs, GetPatternArgs, GlobalRulesResponse,
    ListPatternsArgs, OneOrMany, PatternDetail, PatternList, PatternResponse, RuleList,
};
pub use selection::SelectionExcerpt;
