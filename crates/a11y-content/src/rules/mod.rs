//! Baseline ("global") rules document → typed rule list.
//!
//! A baseline document has frontmatter describing the rule set and one
//! `## Rule: <title>` block per rule:
//!
//! ````markdown
//! ---
//! id: global_ruleset.baseline
//! stack: web/react
//! cache_ttl_seconds: 86400
//! ---
//!
//! ## Rule: Page Title
//!
//! ```yaml
//! id: global.page-title
//! scope: [page]
//! ```
//!
//! ### Must Haves
//! - Every route sets a unique `<title>`
//!
//! ### Snippets
//! ```tsx
//! useDocumentTitle("Settings");
//! ```
//! ````
//!
//! Parsing is all-or-nothing. The first violated constraint fails the whole
//! document, and the error names the rule title and field involved.

mod header;

use a11y_core::{Error, Result, Stack};
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::markdown::blocks::{
    FencedBlock, HeadingPattern, find_all_fenced_blocks, find_first_fenced_block,
    normalize_heading_label, split_by_heading, to_bullet_list,
};
use crate::markdown::frontmatter::{
    FrontmatterResult, extract_frontmatter, scalar_str, string_list,
};
use crate::model::{PatternStatus, ScopeTag};

use header::parse_rule_header;

// ============================================================================
// Types
// ============================================================================

/// How an assistant should apply the rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyPolicy {
    /// Free-form guidance for the consumer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Order in which scopes should be considered. Authoring order is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes_in_order: Option<Vec<ScopeTag>>,
}

/// Frontmatter of a baseline rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRulesMeta {
    pub id: String,
    /// Always equal to the stack the document was parsed for.
    pub stack: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PatternStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Overrides the index TTL for responses built from this document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_policy: Option<ApplyPolicy>,
}

/// One baseline rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRule {
    pub id: String,
    pub title: String,
    /// Non-empty, de-duplicated, sorted by name.
    pub scope: Vec<ScopeTag>,
    pub must_haves: Vec<String>,
    pub donts: Vec<String>,
    pub acceptance_checks: Vec<String>,
    /// Sorted by `(language, code)`.
    pub snippets: Vec<FencedBlock>,
}

impl GlobalRule {
    /// Returns `true` if this rule applies to any of `scopes`.
    pub fn applies_to_any(&self, scopes: &[ScopeTag]) -> bool {
        self.scope.iter().any(|s| scopes.contains(s))
    }
}

/// A fully parsed baseline rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRulesDocument {
    pub meta: GlobalRulesMeta,
    /// Sorted by `id`; ids are unique.
    pub rules: Vec<GlobalRule>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a baseline rules document that lives under `expected` stack.
///
/// The frontmatter `stack` defaults to `expected` when omitted and must
/// match it when present.
///
/// ```rust
/// use a11y_content::rules::parse_global_rules_document;
/// use a11y_core::Stack;
///
/// let text = "---\nid: baseline\n---\n\n## Rule: Page Title\n\n```yaml\nid: global.page-title\nscope: [page]\n```\n\n### Must Haves\n- Unique title\n";
/// let doc = parse_global_rules_document(text, &Stack::parse("web/react").unwrap()).unwrap();
/// assert_eq!(doc.meta.stack, "web/react");
/// assert_eq!(doc.rules[0].id, "global.page-title");
/// ```
pub fn parse_global_rules_document(text: &str, expected: &Stack) -> Result<GlobalRulesDocument> {
    let fm = extract_frontmatter(text)?;
    let meta = parse_meta(&fm, expected)?;

    let mut rules = split_by_heading(fm.body(), HeadingPattern::Rule)
        .into_iter()
        .filter_map(|segment| segment.title.map(|title| (title, segment.body)))
        .map(|(title, body)| parse_rule(&title, &body))
        .collect::<Result<Vec<_>>>()?;

    rules.sort_by(|a, b| a.id.cmp(&b.id));
    if let Some(pair) = rules.windows(2).find(|pair| pair[0].id == pair[1].id) {
        return Err(Error::malformed_field(
            "id",
            format!(
                "duplicate rule id '{}' in rules '{}' and '{}'",
                pair[0].id, pair[0].title, pair[1].title
            ),
        ));
    }

    log::debug!("Parsed {} baseline rules for {expected}", rules.len());
    Ok(GlobalRulesDocument { meta, rules })
}

fn parse_meta(fm: &FrontmatterResult, expected: &Stack) -> Result<GlobalRulesMeta> {
    let id = fm
        .get_str("id")
        .ok_or_else(|| Error::malformed_field("id", "baseline rules document has no id"))?
        .to_string();

    if let Some(raw) = fm.get_str("stack") {
        let declared = Stack::parse(raw)
            .map_err(|_| Error::malformed_field("stack", format!("'{raw}' is not a valid stack")))?;
        if &declared != expected {
            return Err(Error::malformed_field(
                "stack",
                format!("document declares stack '{declared}' but lives under '{expected}'"),
            ));
        }
    }

    let status = fm.get_str("status").map(PatternStatus::parse).transpose()?;

    let cache_ttl_seconds = fm.get_u64("cache_ttl_seconds")?;

    let apply_policy = fm.get_map("apply_policy").map(parse_apply_policy).transpose()?;

    Ok(GlobalRulesMeta {
        id,
        stack: expected.as_string(),
        rule_set: fm.get_str("rule_set").map(str::to_string),
        status,
        summary: fm.get_str("summary").map(str::to_string),
        cache_ttl_seconds,
        apply_policy,
    })
}

fn parse_apply_policy(map: &Mapping) -> Result<ApplyPolicy> {
    let instruction = map
        .get("instruction")
        .and_then(scalar_str)
        .map(str::to_string);

    let scopes_in_order = map
        .get("scopes_in_order")
        .filter(|v| !v.is_null())
        .map(|v| {
            string_list(v)
                .iter()
                .map(|token| ScopeTag::parse_field(token, "apply_policy.scopes_in_order"))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    Ok(ApplyPolicy {
        instruction,
        scopes_in_order,
    })
}

fn parse_rule(title: &str, body: &str) -> Result<GlobalRule> {
    let yaml = find_first_fenced_block(body, "yaml").ok_or_else(|| {
        Error::malformed_field("yaml", format!("rule '{title}' has no yaml header block"))
    })?;
    let header = parse_rule_header(&yaml.code);

    if header.id.is_empty() {
        return Err(Error::malformed_field(
            "id",
            format!("rule '{title}' has no id in its yaml header"),
        ));
    }
    if header.scope.is_empty() {
        return Err(Error::malformed_field(
            "scope",
            format!("rule '{title}' declares no scope"),
        ));
    }
    if let Some(bad) = header.scope.iter().find(|t| ScopeTag::from_token(t).is_none()) {
        return Err(Error::malformed_field(
            "scope",
            format!("rule '{title}' has unknown scope '{bad}'"),
        ));
    }
    let scope = ScopeTag::normalize_list(&header.scope, "scope")?;

    let mut rule = GlobalRule {
        id: header.id,
        title: title.to_string(),
        scope,
        must_haves: Vec::new(),
        donts: Vec::new(),
        acceptance_checks: Vec::new(),
        snippets: Vec::new(),
    };

    for segment in split_by_heading(body, HeadingPattern::Subsection) {
        let Some(label) = segment.title.as_deref().map(normalize_heading_label) else {
            continue;
        };
        match label.as_str() {
            "must haves" => rule.must_haves.extend(to_bullet_list(&segment.body)),
            "don'ts" | "donts" => rule.donts.extend(to_bullet_list(&segment.body)),
            "acceptance checks" => rule.acceptance_checks.extend(to_bullet_list(&segment.body)),
            "snippets" => rule.snippets.extend(find_all_fenced_blocks(&segment.body)),
            _ => {}
        }
    }
    rule.snippets.sort();

    Ok(rule)
}

// ============================================================================
// Tests
// ============================================================================
