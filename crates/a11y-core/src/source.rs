//! Read-only access to the content repository.
//!
//! The indexer never touches the filesystem directly. It goes through
//! [`ContentSource`], which can enumerate files by glob and read them as
//! UTF-8 text. [`LocalFs`] is the production implementation; tests supply
//! in-memory sources.
//!
//! # Example
//!
//! ```no_run
//! use a11y_core::source::{ContentSource, LocalFs};
//! use std::path::Path;
//!
//! # async fn run() -> a11y_core::Result<()> {
//! let fs = LocalFs::new();
//! let files = fs.glob("/data/patterns/web/react/components/**/*.md").await?;
//! for path in files {
//!     let text = fs.read_text(&path).await?;
//!     println!("{} ({} bytes)", path.display(), text.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use async_walkdir::WalkDir;
use futures::StreamExt;

use crate::{Error, Result};

/// Read-only file access used by the indexer and query operations.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Returns `true` if a regular file exists at `path`.
    async fn exists(&self, path: &Path) -> bool;

    /// Read the full file as UTF-8 text.
    async fn read_text(&self, path: &Path) -> Result<String>;

    /// Enumerate files matching a glob pattern.
    ///
    /// No ordering is guaranteed; callers that need determinism sort.
    async fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// [`ContentSource`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a local filesystem source.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentSource for LocalFs {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn read_text(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(e, path))
    }

    async fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = glob::Pattern::new(pattern)
            .map_err(|e| Error::config(format!("Invalid glob pattern '{pattern}': {e}")))?;

        let root = walk_root(pattern);
        if root == Path::new(pattern) {
            return Ok(if self.exists(&root).await { vec![root] } else { Vec::new() });
        }
        let is_dir = tokio::fs::metadata(&root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut walker = WalkDir::new(&root);
        while let Some(entry) = walker.next().await {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {e}", root.display());
                    continue;
                }
            };

            let path = entry.path();
            let candidate = if pattern_is_relative(pattern) {
                path.strip_prefix(".").unwrap_or(path.as_path()).to_path_buf()
            } else {
                path.clone()
            };
            if !matcher.matches_path_with(&candidate, MATCH_OPTIONS) {
                continue;
            }
            let is_file = tokio::fs::metadata(&path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if is_file {
                paths.push(candidate);
            }
        }
        Ok(paths)
    }
}

const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn pattern_is_relative(pattern: &str) -> bool {
    !Path::new(pattern).has_root()
}

/// Longest leading run of path components without glob metacharacters.
///
/// Returns the pattern itself when it has no metacharacters at all.
fn walk_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if text.contains(['*', '?', '[']) {
            if root.as_os_str().is_empty() {
                root.push(".");
            }
            return root;
        }
        root.push(component);
    }
    root
}

// ============================================================================
// Tests
// ============================================================================
