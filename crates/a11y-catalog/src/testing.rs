//! In-memory content source and fixtures for unit tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use a11y_core::{ContentSource, Error, Result};
use async_trait::async_trait;

pub const ROOT: &str = "/repo";
pub const STACK_DIR: &str = "/repo/patterns/web/react";

pub const BASELINE: &str = r#"---
id: global_ruleset.baseline
stack: web/react
cache_ttl_seconds: 86400
---

## Rule: Page Title

```yaml
id: global.page-title
scope: [page]
```

### Must Haves
- Every route sets a unique title
- The page name comes first

## Rule: Focus Visible

```yaml
id: global.focus-visible
scope:
  - utility
  - component
```

### Must Haves
- Focus is always visible
"#;

pub const CATALOG: &str =
    r#"{"patterns": [{"id": "dialog", "use_when": ["Confirming a destructive action"]}]}"#;

/// Minimal valid component document.
pub fn component(id: &str, summary: &str) -> String {
    format!(
        "---\nid: {id}\nstatus: stable\nsummary: {summary}\ntags: [overlay]\n---\n\n## Must Haves\n- A\n  - A1\n  - A2\n- B\n"
    )
}

/// A source holding the baseline, catalog, and one `dialog` component.
pub fn seeded() -> MemorySource {
    let source = MemorySource::new();
    source.insert_baseline(BASELINE);
    source.insert_catalog(CATALOG);
    source.insert_component("dialog.md", &component("dialog", "Modal dialog"));
    source
}

/// Files in a map. Glob results come back in reverse path order unless
/// built with [`MemorySource::forward`].
#[derive(Debug, Default)]
pub struct MemorySource {
    files: RwLock<BTreeMap<PathBuf, String>>,
    forward: bool,
    reads: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: &str) {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), text.to_string());
    }

    pub fn insert_baseline(&self, text: &str) {
        self.insert(format!("{STACK_DIR}/global/global_rules.md"), text);
    }

    pub fn insert_catalog(&self, text: &str) {
        self.insert(format!("{STACK_DIR}/patterns.json"), text);
    }

    pub fn insert_component(&self, relative: &str, text: &str) {
        self.insert(format!("{STACK_DIR}/components/{relative}"), text);
    }

    pub fn remove_component(&self, relative: &str) {
        self.files
            .write()
            .unwrap()
            .remove(Path::new(&format!("{STACK_DIR}/components/{relative}")));
    }

    pub fn snapshot(&self) -> Vec<(PathBuf, String)> {
        self.files
            .read()
            .unwrap()
            .iter()
            .map(|(p, t)| (p.clone(), t.clone()))
            .collect()
    }

    /// Number of successful `read_text` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    async fn read_text(&self, path: &Path) -> Result<String> {
        let text = self.files.read().unwrap().get(path).cloned().ok_or_else(|| {
            Error::io_with_path(std::io::Error::from(std::io::ErrorKind::NotFound), path)
        })?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(text)
    }

    async fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = glob::Pattern::new(pattern)
            .map_err(|e| Error::config(format!("Invalid glob pattern: {e}")))?;
        let mut matches: Vec<PathBuf> = self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|p| pattern.matches_path(p))
            .cloned()
            .collect();
        if !self.forward {
            matches.reverse();
        }
        Ok(matches)
    }
}
