//! Core types for the a11y pattern catalog: errors, stack identifiers,
//! content sources, and configuration.
//!
//! This crate has no internal dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`stack`]: Validated `<group>/<name>` stack identifiers
//! - [`source`]: Read-only access to the content repository
//! - [`config`]: TOML + environment configuration

pub mod config;
pub mod error;
pub mod source;
pub mod stack;

// Re-export key types at crate root for convenience
pub use config::CatalogConfig;
pub use error::{Error, Result};
pub use source::{ContentSource, LocalFs};
pub use stack::Stack;
