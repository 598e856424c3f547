//! Time-bounded per-stack index cache.
//!
//! One slot per stack holds the last built [`PatternIndex`] and when it was
//! built. A request reuses the slot while its age is below the TTL and
//! otherwise rebuilds inline. There is no background refresh.
//!
//! The lock is never held across a build: two callers that miss at the same
//! time both build, and the last one to finish owns the slot. Both results
//! are complete indexes, so either is correct.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use a11y_core::{ContentSource, Result, Stack};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::index::{PatternIndex, build_index};

#[derive(Debug, Clone)]
struct CacheSlot {
    index: Arc<PatternIndex>,
    built_at: Instant,
}

impl CacheSlot {
    fn is_fresh(&self) -> bool {
        let ttl = Duration::from_secs(self.index.cache().cache_ttl_seconds);
        self.built_at.elapsed() < ttl
    }
}

/// Memoizes [`build_index`] per stack.
///
/// Construct one per process (or per test) and share it by reference.
pub struct IndexCache {
    source: Arc<dyn ContentSource>,
    root: PathBuf,
    ttl_seconds: u64,
    slots: RwLock<HashMap<Stack, CacheSlot>>,
}

impl IndexCache {
    /// Create an empty cache over `source` rooted at `root`.
    pub fn new(source: Arc<dyn ContentSource>, root: impl Into<PathBuf>, ttl_seconds: u64) -> Self {
        Self {
            source,
            root: root.into(),
            ttl_seconds,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Content source used for builds.
    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// Content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// TTL given to newly built indexes.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Return the cached index for `stack`, rebuilding it if absent or stale.
    pub async fn get_index(&self, stack: &Stack) -> Result<Arc<PatternIndex>> {
        if let Some(slot) = self.slots.read().await.get(stack) {
            if slot.is_fresh() {
                log::debug!("Index cache hit for {stack}");
                return Ok(Arc::clone(&slot.index));
            }
        }

        log::debug!("Index cache miss for {stack}; rebuilding");
        let index = Arc::new(build_index(self.source(), &self.root, stack, self.ttl_seconds).await?);
        let slot = CacheSlot {
            index: Arc::clone(&index),
            built_at: Instant::now(),
        };
        self.slots.write().await.insert(stack.clone(), slot);
        Ok(index)
    }

    /// Evict one stack, or every stack when `stack` is `None`.
    ///
    /// Returns the number of slots removed.
    pub async fn clear(&self, stack: Option<&Stack>) -> usize {
        let mut slots = self.slots.write().await;
        let removed = match stack {
            Some(stack) => usize::from(slots.remove(stack).is_some()),
            None => {
                let count = slots.len();
                slots.clear();
                count
            }
        };
        log::debug!("Cleared {removed} index cache slot(s)");
        removed
    }

    /// Stacks that currently have a slot, fresh or not.
    pub async fn cached_stacks(&self) -> Vec<Stack> {
        let mut stacks: Vec<Stack> = self.slots.read().await.keys().cloned().collect();
        stacks.sort();
        stacks
    }
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("root", &self.root)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
