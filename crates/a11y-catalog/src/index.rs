//! Repository indexer: one stack's files → [`PatternIndex`].
//!
//! An index is built wholesale and never mutated. Every contributing file is
//! read exactly once and that text feeds both the fingerprint and the
//! frontmatter parse.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use a11y_core::{ContentSource, Error, Result, Stack};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::{ComponentDocument, PatternSummary};
use crate::fingerprint::{RevisionInputs, catalog_revision};
use crate::layout::{StackLayout, normalize_separators};
use crate::selection::SelectionCatalog;

/// Cache metadata returned with every response built from an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMeta {
    pub catalog_revision: String,
    pub cache_ttl_seconds: u64,
}

/// In-memory index of one stack's component patterns.
#[derive(Debug, Clone)]
pub struct PatternIndex {
    layout: StackLayout,
    cache: CacheMeta,
    all: Vec<PatternSummary>,
    by_id: HashMap<String, usize>,
    id_to_path: BTreeMap<String, PathBuf>,
    built_at: DateTime<Utc>,
}

impl PatternIndex {
    /// Stack this index covers.
    pub fn stack(&self) -> &Stack {
        self.layout.stack()
    }

    /// File layout the index was built from.
    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    /// Revision and default TTL.
    pub fn cache(&self) -> &CacheMeta {
        &self.cache
    }

    /// All summaries, sorted by id.
    pub fn all(&self) -> &[PatternSummary] {
        &self.all
    }

    /// Summary for `id`.
    pub fn get(&self, id: &str) -> Option<&PatternSummary> {
        self.by_id.get(id).map(|&i| &self.all[i])
    }

    /// Source file for `id`.
    pub fn path_of(&self, id: &str) -> Option<&Path> {
        self.id_to_path.get(id).map(PathBuf::as_path)
    }

    /// Indexed ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.id_to_path.keys().map(String::as_str)
    }

    /// When the index was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Number of indexed patterns.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Returns `true` if the stack has no component patterns.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Build the index for `stack` under `root`.
///
/// Fails with a configuration error if the baseline rules or selection
/// catalog file is missing, and with malformed content (naming the file) on
/// the first invalid component or duplicate id.
pub async fn build_index(
    source: &dyn ContentSource,
    root: &Path,
    stack: &Stack,
    ttl_seconds: u64,
) -> Result<PatternIndex> {
    let layout = StackLayout::new(root, stack);

    let baseline_path = layout.baseline_path();
    if !source.exists(&baseline_path).await {
        return Err(Error::config(format!(
            "Baseline rules file not found for stack '{stack}': {}",
            baseline_path.display()
        )));
    }
    let catalog_path = layout.catalog_path();
    if !source.exists(&catalog_path).await {
        return Err(Error::config(format!(
            "Selection catalog not found for stack '{stack}': {}",
            catalog_path.display()
        )));
    }

    let component_paths = enumerate_components(source, &layout).await?;
    log::debug!(
        "Found {} component files for {stack}",
        component_paths.len()
    );

    let baseline_text = source.read_text(&baseline_path).await?;
    let catalog_text = source.read_text(&catalog_path).await?;
    let mut components = Vec::with_capacity(component_paths.len());
    for path in component_paths {
        let text = source.read_text(&path).await?;
        components.push((path, text));
    }

    let revision_entries: Vec<(String, String)> = components
        .iter()
        .map(|(path, text)| (layout.relative_to_root(path), text.clone()))
        .collect();
    let stack_name = stack.as_string();
    let catalog_revision = catalog_revision(&RevisionInputs {
        stack: &stack_name,
        baseline: &baseline_text,
        catalog: &catalog_text,
        components: &revision_entries,
    });

    let selection = SelectionCatalog::parse(&catalog_text).map_err(|e| e.with_path(&catalog_path))?;

    let mut summaries = Vec::with_capacity(components.len());
    let mut id_to_path: BTreeMap<String, PathBuf> = BTreeMap::new();
    for (path, text) in components {
        let ComponentDocument { mut summary, .. } =
            ComponentDocument::parse(&text, stack).map_err(|e| e.with_path(&path))?;

        if let Some(first) = id_to_path.get(&summary.id) {
            return Err(Error::malformed_field(
                "id",
                format!(
                    "duplicate pattern id '{}' in {} and {}",
                    summary.id,
                    first.display(),
                    path.display()
                ),
            )
            .with_path(&path));
        }

        summary.selection_excerpt = selection.excerpt_for(&summary.id).cloned();
        id_to_path.insert(summary.id.clone(), path);
        summaries.push(summary);
    }

    summaries.sort_by(|a, b| a.id.cmp(&b.id));
    let by_id = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect();

    log::info!(
        "Indexed {} patterns for {stack} (revision {})",
        summaries.len(),
        &catalog_revision[..12]
    );

    Ok(PatternIndex {
        layout,
        cache: CacheMeta {
            catalog_revision,
            cache_ttl_seconds: ttl_seconds,
        },
        all: summaries,
        by_id,
        id_to_path,
        built_at: Utc::now(),
    })
}

/// Glob every component extension, then de-duplicate and sort by the
/// `/`-normalized path string.
async fn enumerate_components(
    source: &dyn ContentSource,
    layout: &StackLayout,
) -> Result<Vec<PathBuf>> {
    let mut paths = BTreeSet::new();
    for pattern in layout.component_globs() {
        for path in source.glob(&pattern).await? {
            paths.insert(normalize_separators(&path));
        }
    }
    Ok(paths.into_iter().map(PathBuf::from).collect())
}

// ============================================================================
// Tests
// ============================================================================
