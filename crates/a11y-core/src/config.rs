//! Catalog configuration.
//!
//! Configuration is a small TOML file plus environment overrides:
//!
//! ```toml
//! content_root = "~/src/a11y-patterns"
//! default_ttl_seconds = 300
//! default_stack = "web/react"
//! ```
//!
//! Resolution order for [`CatalogConfig::load`]:
//!
//! 1. The explicit path passed by the caller, if any
//! 2. The file named by `A11Y_PATTERNS_CONFIG`, if set
//! 3. Built-in defaults
//!
//! Then `A11Y_PATTERNS_ROOT`, `A11Y_PATTERNS_CACHE_TTL` and
//! `A11Y_PATTERNS_DEFAULT_STACK` override individual values.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming a config file.
pub const ENV_CONFIG: &str = "A11Y_PATTERNS_CONFIG";
/// Environment variable overriding the content root.
pub const ENV_ROOT: &str = "A11Y_PATTERNS_ROOT";
/// Environment variable overriding the default index TTL.
pub const ENV_CACHE_TTL: &str = "A11Y_PATTERNS_CACHE_TTL";
/// Environment variable overriding the default stack.
pub const ENV_DEFAULT_STACK: &str = "A11Y_PATTERNS_DEFAULT_STACK";

/// Default lifetime of a cached index, in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Settings for locating and caching the pattern catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory containing the `patterns/` tree.
    pub content_root: PathBuf,
    /// How long a built index is reused before it is rebuilt.
    pub default_ttl_seconds: u64,
    /// Stack used when a caller does not name one.
    pub default_stack: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("."),
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
            default_stack: None,
        }
    }
}

impl CatalogConfig {
    /// Create a config rooted at `content_root` with default settings.
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            ..Self::default()
        }
    }

    /// Set the default TTL.
    pub fn with_ttl_seconds(mut self, ttl: u64) -> Self {
        self.default_ttl_seconds = ttl;
        self
    }

    /// Set the default stack.
    pub fn with_default_stack(mut self, stack: impl Into<String>) -> Self {
        self.default_stack = Some(stack.into());
        self
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| Error::config(format!("Invalid config: {e}")))?;
        config.content_root = expand_path(&config.content_root)?;
        Ok(config)
    }

    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&text).map_err(|e| match e {
            Error::Config { message } => Error::config(format!("{}: {message}", path.display())),
            other => other,
        })
    }

    /// Load configuration following the documented resolution order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = env::var(ENV_CONFIG).ok().map(PathBuf::from);
        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                log::debug!("Loading catalog config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Takes the lookup as a function so tests do not mutate process env.
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_ROOT).filter(|v| !v.trim().is_empty()) {
            self.content_root = expand_path(Path::new(root.trim()))?;
        }
        if let Some(ttl) = lookup(ENV_CACHE_TTL) {
            self.default_ttl_seconds = ttl.trim().parse().map_err(|_| {
                Error::config(format!("{ENV_CACHE_TTL} must be a whole number, got '{ttl}'"))
            })?;
        }
        if let Some(stack) = lookup(ENV_DEFAULT_STACK).filter(|v| !v.trim().is_empty()) {
            self.default_stack = Some(stack.trim().to_string());
        }
        Ok(self)
    }
}

/// Expand `~` and `$VAR` references in a configured path.
fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| Error::config(format!("Cannot expand path '{raw}': {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

// ============================================================================
// Tests
// ============================================================================
