//! Markdown parsing and document mapping for the a11y pattern catalog.
//!
//! This crate turns authored markdown into typed records. It does no I/O:
//! every function takes document text and returns data or an error, and
//! callers attach file paths to errors with [`a11y_core::Error::with_path`].
//!
//! # Modules
//!
//! - [`markdown`]: Generic primitives
//!   - [`markdown::frontmatter`]: Frontmatter extraction
//!   - [`markdown::blocks`]: Heading segments, bullets, fenced blocks
//! - [`model`]: `PatternStatus` and `ScopeTag` vocabularies
//! - [`pattern`]: Component pattern body → `PatternSections`
//! - [`rules`]: Baseline rules document → `GlobalRulesDocument`
//!
//! # Example
//!
//! ```rust
//! use a11y_content::{extract_frontmatter, extract_sections};
//!
//! let doc = "---\nid: button\nstatus: stable\nsummary: Clickable action\n---\n\n## Must Haves\n- A\n- B\n";
//! let fm = extract_frontmatter(doc).unwrap();
//! assert_eq!(fm.get_str("id"), Some("button"));
//!
//! let sections = extract_sections(fm.body());
//! assert_eq!(sections.must_haves, vec!["A", "B"]);
//! ```

pub mod markdown;
pub mod model;
pub mod pattern;
pub mod rules;

// Re-export commonly used types
pub use markdown::{FencedBlock, FrontmatterResult, extract_frontmatter};
pub use model::{PatternStatus, ScopeTag};
pub use pattern::{PatternSections, extract_sections};
pub use rules::{ApplyPolicy, GlobalRule, GlobalRulesDocument, GlobalRulesMeta, parse_global_rules_document};
