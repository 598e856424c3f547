//! MCP tools for the a11y pattern catalog.
//!
//! This crate exposes a [`PatternCatalog`](a11y_catalog::PatternCatalog)
//! as Model Context Protocol tools. It supplies tool definitions and
//! dispatch only; the transport that serves them lives in the host
//! application.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        a11y-mcp                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ToolRegistry trait: tool listing and dispatch by name      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PatternTools:                                              │
//! │  ├── list_patterns                                          │
//! │  ├── get_pattern                                            │
//! │  ├── get_global_rules                                       │
//! │  └── catalog_refresh                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpErrorExt: a11y_core::Error → rmcp::ErrorData            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use a11y_catalog::PatternCatalog;
//! use a11y_core::CatalogConfig;
//! use a11y_mcp::{PatternTools, ToolRegistry};
//!
//! let config = CatalogConfig::load(None)?;
//! let tools = PatternTools::new(Arc::new(PatternCatalog::from_config(&config)?));
//!
//! let result = tools
//!     .call("get_pattern", serde_json::json!({"id": "dialog"}))
//!     .expect("registered tool")
//!     .await?;
//! ```

pub mod error;
pub mod registry;
pub mod tools;

// Re-exports: registry
pub use registry::{ToolRegistry, ToolResult};

// Re-exports: error
pub use error::McpErrorExt;

// Re-exports: tools
pub use tools::{PatternTools, RefreshArgs, RefreshResponse};

// Re-export rmcp model types used in the public API
pub use rmcp::model;
