//! Query operations against a built [`PatternIndex`].
//!
//! Each operation checks the requested stack against the index, does its
//! work, and wraps the result in an [`Envelope`] carrying the contract
//! version and the index's cache metadata. Failures from parsing propagate
//! unchanged.

use a11y_content::rules::parse_global_rules_document;
use a11y_content::{GlobalRule, GlobalRulesMeta, PatternSections, ScopeTag, extract_sections};
use a11y_core::{ContentSource, Error, Result, Stack};
use serde::{Deserialize, Serialize};

use crate::component::{ComponentDocument, PatternSummary};
use crate::index::{CacheMeta, PatternIndex};
use crate::layout::normalize_separators;

/// Version of the response shape.
pub const CONTRACT_VERSION: &str = "1.0";

/// Maximum near-miss ids attached to a not-found error.
const MAX_SUGGESTIONS: usize = 3;

/// Minimum normalized similarity for a near-miss id.
const SUGGESTION_THRESHOLD: f64 = 0.6;

// ============================================================================
// Envelope
// ============================================================================

/// Response wrapper: `{contract_version, catalog_revision, cache_ttl_seconds, ...body}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub contract_version: String,
    pub catalog_revision: String,
    pub cache_ttl_seconds: u64,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    /// Wrap `body` with `cache` metadata.
    pub fn new(cache: &CacheMeta, body: T) -> Self {
        Self {
            contract_version: CONTRACT_VERSION.to_string(),
            catalog_revision: cache.catalog_revision.clone(),
            cache_ttl_seconds: cache.cache_ttl_seconds,
            body,
        }
    }

    /// Replace the TTL.
    pub fn with_ttl_seconds(mut self, ttl: u64) -> Self {
        self.cache_ttl_seconds = ttl;
        self
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flatten to a list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

/// Arguments for [`list_patterns`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPatternsArgs {
    /// Must equal the index stack. `None` means "the index's stack".
    pub stack: Option<String>,
    /// Keep patterns having any of these tags (case-insensitive).
    pub tags: Option<Vec<String>>,
    /// Case-insensitive substring of id, summary, or an alias.
    pub query: Option<String>,
}

/// Arguments for [`get_pattern`].
#[derive(Debug, Clone, Deserialize)]
pub struct GetPatternArgs {
    pub stack: Option<String>,
    pub id: String,
}

/// Arguments for [`get_global_rules`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetGlobalRulesArgs {
    pub stack: Option<String>,
    /// Keep rules whose scope intersects these tags.
    pub scope: Option<OneOrMany>,
}

// ============================================================================
// Results
// ============================================================================

/// Body of a `list_patterns` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternList {
    pub count: usize,
    pub patterns: Vec<PatternSummary>,
}

/// One pattern with its parsed sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDetail {
    #[serde(flatten)]
    pub summary: PatternSummary,
    pub sections: PatternSections,
    /// Path relative to the content root.
    pub source_path: String,
}

/// Body of a `get_pattern` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResponse {
    pub pattern: PatternDetail,
}

/// Filtered rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleList {
    pub count: usize,
    pub items: Vec<GlobalRule>,
}

/// Body of a `get_global_rules` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalRulesResponse {
    pub meta: GlobalRulesMeta,
    pub rules: RuleList,
}

// ============================================================================
// Operations
// ============================================================================

/// Fail unless `requested` names the index's stack.
pub fn ensure_stack(index: &PatternIndex, requested: Option<&str>) -> Result<()> {
    let Some(raw) = requested else {
        return Ok(());
    };
    let stack = Stack::parse(raw)?;
    if &stack != index.stack() {
        return Err(Error::stack_mismatch(index.stack().as_string(), stack.as_string()));
    }
    Ok(())
}

/// List patterns, optionally filtered by tags and a text query.
pub fn list_patterns(index: &PatternIndex, args: &ListPatternsArgs) -> Result<Envelope<PatternList>> {
    ensure_stack(index, args.stack.as_deref())?;

    let tags: Vec<String> = args
        .tags
        .iter()
        .flatten()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let needle = args
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut patterns: Vec<PatternSummary> = index
        .all()
        .iter()
        .filter(|p| tags.is_empty() || p.has_any_tag(&tags))
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches_query(n)))
        .cloned()
        .collect();
    patterns.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(Envelope::new(
        index.cache(),
        PatternList {
            count: patterns.len(),
            patterns,
        },
    ))
}

/// Fetch one pattern, re-reading its file.
///
/// The file is parsed fresh on every call. Its id and stack must still
/// match the index; other summary fields come from the file, and a change
/// in tags since the index was built is only logged.
pub async fn get_pattern(
    index: &PatternIndex,
    source: &dyn ContentSource,
    args: &GetPatternArgs,
) -> Result<Envelope<PatternResponse>> {
    ensure_stack(index, args.stack.as_deref())?;

    let id = args.id.trim();
    let path = index.path_of(id).ok_or_else(|| {
        Error::not_found("pattern", id).with_suggestions(suggest_ids(id, index.ids()))
    })?;

    let text = source.read_text(path).await?;
    let ComponentDocument { mut summary, body } =
        ComponentDocument::parse(&text, index.stack()).map_err(|e| e.with_path(path))?;

    if summary.id != id {
        return Err(Error::malformed_field(
            "id",
            format!("file now declares id '{}' but was indexed as '{id}'", summary.id),
        )
        .with_path(path));
    }

    if let Some(cached) = index.get(id) {
        if cached.tags != summary.tags {
            log::debug!("Pattern '{id}' tags changed since the index was built");
        }
        summary.selection_excerpt = cached.selection_excerpt.clone();
    }

    let detail = PatternDetail {
        summary,
        sections: extract_sections(&body),
        source_path: index.layout().relative_to_root(path),
    };

    Ok(Envelope::new(index.cache(), PatternResponse { pattern: detail }))
}

/// Fetch baseline rules, optionally filtered by scope.
///
/// The response TTL is the document's `cache_ttl_seconds` when declared,
/// otherwise the index TTL.
pub async fn get_global_rules(
    index: &PatternIndex,
    source: &dyn ContentSource,
    args: &GetGlobalRulesArgs,
) -> Result<Envelope<GlobalRulesResponse>> {
    ensure_stack(index, args.stack.as_deref())?;
    let filter = scope_filter(args.scope.as_ref())?;

    let path = index.layout().baseline_path();
    let text = source.read_text(&path).await?;
    let document =
        parse_global_rules_document(&text, index.stack()).map_err(|e| e.with_path(&path))?;

    let items: Vec<GlobalRule> = match &filter {
        Some(scopes) => document
            .rules
            .into_iter()
            .filter(|rule| rule.applies_to_any(scopes))
            .collect(),
        None => document.rules,
    };

    let ttl = document
        .meta
        .cache_ttl_seconds
        .unwrap_or(index.cache().cache_ttl_seconds);

    log::debug!(
        "Serving {} baseline rules from {}",
        items.len(),
        normalize_separators(&path)
    );

    let body = GlobalRulesResponse {
        meta: document.meta,
        rules: RuleList {
            count: items.len(),
            items,
        },
    };
    Ok(Envelope::new(index.cache(), body).with_ttl_seconds(ttl))
}

/// Decode a scope filter. An empty list means no filter.
fn scope_filter(scope: Option<&OneOrMany>) -> Result<Option<Vec<ScopeTag>>> {
    let Some(scope) = scope else {
        return Ok(None);
    };
    let tokens: Vec<String> = scope
        .to_vec()
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    tokens
        .iter()
        .map(|t| {
            ScopeTag::from_token(t).ok_or_else(|| {
                Error::invalid_argument(format!(
                    "unknown scope '{t}'; expected one of utility, style, component, layout, page"
                ))
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Closest known ids to `wanted`, best first.
fn suggest_ids<'a>(wanted: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    let wanted = wanted.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .map(|c| (strsim::normalized_levenshtein(&wanted, &c.to_lowercase()), c))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, id)| id.to_string())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
