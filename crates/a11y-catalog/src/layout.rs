//! Where a stack's files live below the content root.
//!
//! ```text
//! <root>/patterns/<group>/<name>/
//! ├── global/global_rules.md      baseline rules
//! ├── patterns.json               selection catalog
//! └── components/**/*.{md,mdx,markdown}
//! ```

use std::path::{Path, PathBuf};

use a11y_core::Stack;

/// Extensions recognized for component pattern files.
pub const COMPONENT_EXTENSIONS: [&str; 3] = ["md", "mdx", "markdown"];

/// Resolved file locations for one stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackLayout {
    root: PathBuf,
    stack: Stack,
    stack_dir: PathBuf,
}

impl StackLayout {
    /// Resolve the layout of `stack` below `root`.
    pub fn new(root: impl Into<PathBuf>, stack: &Stack) -> Self {
        let root = root.into();
        let stack_dir = root.join(stack.relative_dir());
        Self {
            root,
            stack: stack.clone(),
            stack_dir,
        }
    }

    /// Content root this layout was resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The stack.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// `patterns/<group>/<name>` below the root.
    pub fn stack_dir(&self) -> &Path {
        &self.stack_dir
    }

    /// The baseline rules document.
    pub fn baseline_path(&self) -> PathBuf {
        self.stack_dir.join("global").join("global_rules.md")
    }

    /// The selection catalog JSON.
    pub fn catalog_path(&self) -> PathBuf {
        self.stack_dir.join("patterns.json")
    }

    /// Directory holding component pattern files.
    pub fn components_dir(&self) -> PathBuf {
        self.stack_dir.join("components")
    }

    /// One glob pattern per component extension.
    ///
    /// The directory part is escaped so glob metacharacters in the content
    /// root are matched literally.
    pub fn component_globs(&self) -> Vec<String> {
        let dir = glob::Pattern::escape(&normalize_separators(&self.components_dir()));
        COMPONENT_EXTENSIONS
            .iter()
            .map(|ext| format!("{dir}/**/*.{ext}"))
            .collect()
    }

    /// Path of `file` relative to the content root, with `/` separators.
    ///
    /// Files outside the root are returned whole.
    pub fn relative_to_root(&self, file: &Path) -> String {
        let relative = file.strip_prefix(&self.root).unwrap_or(file);
        normalize_separators(relative)
    }
}

/// Render a path with forward slashes.
pub fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// ============================================================================
// Tests
// ============================================================================
