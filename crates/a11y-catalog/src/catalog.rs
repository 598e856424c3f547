//! [`PatternCatalog`]: cache plus query operations behind one handle.

use std::path::PathBuf;
use std::sync::Arc;

use a11y_core::{CatalogConfig, ContentSource, Error, LocalFs, Result, Stack};

use crate::cache::IndexCache;
use crate::query::{
    self, Envelope, GetGlobalRulesArgs, GetPatternArgs, GlobalRulesResponse, ListPatternsArgs,
    PatternList, PatternResponse,
};

/// Entry point for serving the pattern catalog.
///
/// Owns an [`IndexCache`]. Each query resolves its stack (falling back to the
/// configured default), fetches the index, and runs the operation.
///
/// # Example
///
/// ```no_run
/// use a11y_catalog::{ListPatternsArgs, PatternCatalog};
/// use a11y_core::CatalogConfig;
///
/// # async fn run() -> a11y_core::Result<()> {
/// let config = CatalogConfig::new("/srv/a11y").with_default_stack("web/react");
/// let catalog = PatternCatalog::from_config(&config)?;
///
/// let list = catalog.list_patterns(ListPatternsArgs::default()).await?;
/// println!("{} patterns at {}", list.body.count, list.catalog_revision);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PatternCatalog {
    cache: IndexCache,
    default_stack: Option<Stack>,
}

impl PatternCatalog {
    /// Build a catalog over the local filesystem from configuration.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let default_stack = config
            .default_stack
            .as_deref()
            .map(Stack::parse)
            .transpose()
            .map_err(|e| Error::config(format!("Invalid default stack: {e}")))?;
        log::info!(
            "Serving a11y patterns from {} (ttl {}s)",
            config.content_root.display(),
            config.default_ttl_seconds
        );
        Ok(Self {
            cache: IndexCache::new(
                Arc::new(LocalFs::new()),
                config.content_root.clone(),
                config.default_ttl_seconds,
            ),
            default_stack,
        })
    }

    /// Build a catalog over any content source.
    pub fn with_source(
        source: Arc<dyn ContentSource>,
        root: impl Into<PathBuf>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            cache: IndexCache::new(source, root, ttl_seconds),
            default_stack: None,
        }
    }

    /// Set the stack used when a request names none.
    pub fn with_default_stack(mut self, stack: Stack) -> Self {
        self.default_stack = Some(stack);
        self
    }

    /// The underlying cache.
    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// Default stack, if configured.
    pub fn default_stack(&self) -> Option<&Stack> {
        self.default_stack.as_ref()
    }

    /// Resolve a requested stack, falling back to the default.
    pub fn resolve_stack(&self, requested: Option<&str>) -> Result<Stack> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Stack::parse(raw),
            None => self
                .default_stack
                .clone()
                .ok_or_else(|| Error::invalid_argument("stack is required (no default stack configured)")),
        }
    }

    /// List patterns for a stack.
    pub async fn list_patterns(&self, mut args: ListPatternsArgs) -> Result<Envelope<PatternList>> {
        let stack = self.resolve_stack(args.stack.as_deref())?;
        let index = self.cache.get_index(&stack).await?;
        args.stack = Some(stack.as_string());
        query::list_patterns(&index, &args)
    }

    /// Fetch one pattern's detail.
    pub async fn get_pattern(&self, mut args: GetPatternArgs) -> Result<Envelope<PatternResponse>> {
        let stack = self.resolve_stack(args.stack.as_deref())?;
        let index = self.cache.get_index(&stack).await?;
        args.stack = Some(stack.as_string());
        query::get_pattern(&index, self.cache.source(), &args).await
    }

    /// Fetch baseline rules for a stack.
    pub async fn get_global_rules(
        &self,
        mut args: GetGlobalRulesArgs,
    ) -> Result<Envelope<GlobalRulesResponse>> {
        let stack = self.resolve_stack(args.stack.as_deref())?;
        let index = self.cache.get_index(&stack).await?;
        args.stack = Some(stack.as_string());
        query::get_global_rules(&index, self.cache.source(), &args).await
    }

    /// Drop cached indexes for one stack, or all of them.
    ///
    /// Returns the number of evicted stacks.
    pub async fn refresh(&self, stack: Option<&str>) -> Result<usize> {
        let stack = stack
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Stack::parse)
            .transpose()?;
        Ok(self.cache.clear(stack.as_ref()).await)
    }
}

// ============================================================================
// Tests
// ============================================================================
