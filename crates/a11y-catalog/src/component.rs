//! Component pattern documents: frontmatter → [`PatternSummary`].

use std::collections::BTreeSet;

use a11y_content::markdown::FrontmatterResult;
use a11y_content::{PatternStatus, extract_frontmatter};
use a11y_core::{Error, Result, Stack};
use serde::{Deserialize, Serialize};

use crate::selection::SelectionExcerpt;

/// Index record for one component pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub id: String,
    pub stack: String,
    pub status: PatternStatus,
    pub summary: String,
    /// De-duplicated and sorted.
    pub tags: Vec<String>,
    /// De-duplicated and sorted.
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_excerpt: Option<SelectionExcerpt>,
}

impl PatternSummary {
    /// Case-insensitive tag membership.
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        let wanted: Vec<String> = wanted.iter().map(|w| w.to_lowercase()).collect();
        self.tags
            .iter()
            .map(|tag| tag.to_lowercase())
            .any(|tag| wanted.contains(&tag))
    }

    /// Case-insensitive substring match against id, summary, and aliases.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self.summary.to_lowercase().contains(needle)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(needle))
    }
}

/// A parsed component file: validated summary plus markdown body.
#[derive(Debug, Clone)]
pub struct ComponentDocument {
    pub summary: PatternSummary,
    pub body: String,
}

impl ComponentDocument {
    /// Parse and validate a component file that lives under `stack`.
    ///
    /// `id` and `summary` are required. A missing `status` defaults to
    /// `alpha`; a present one must be a known value. A declared `stack` must
    /// equal `stack`. Errors carry no path; callers attach it.
    pub fn parse(text: &str, stack: &Stack) -> Result<Self> {
        let fm = extract_frontmatter(text)?;
        let summary = decode_summary(&fm, stack)?;
        Ok(Self {
            summary,
            body: fm.into_body(),
        })
    }
}

fn decode_summary(fm: &FrontmatterResult, stack: &Stack) -> Result<PatternSummary> {
    let id = fm
        .get_str("id")
        .ok_or_else(|| Error::malformed_field("id", "component pattern has no id"))?;
    let summary = fm
        .get_str("summary")
        .ok_or_else(|| Error::malformed_field("summary", format!("pattern '{id}' has no summary")))?;

    let status = match fm.get_str("status") {
        Some(raw) => PatternStatus::parse(raw)?,
        None => PatternStatus::Alpha,
    };

    if let Some(raw) = fm.get_str("stack") {
        let declared = Stack::parse(raw)
            .map_err(|_| Error::malformed_field("stack", format!("'{raw}' is not a valid stack")))?;
        if &declared != stack {
            return Err(Error::malformed_field(
                "stack",
                format!("pattern '{id}' declares stack '{declared}' but lives under '{stack}'"),
            ));
        }
    }

    Ok(PatternSummary {
        id: id.to_string(),
        stack: stack.as_string(),
        status,
        summary: summary.to_string(),
        tags: sorted_unique(fm.get_string_list("tags")),
        aliases: sorted_unique(fm.get_string_list("aliases")),
        selection_excerpt: None,
    })
}

fn sorted_unique(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn web_react() -> Stack {
        Stack::parse("web/react").unwrap()
    }

    #[test]
    fn test_parse_component() {
        let text = "---\nid: dialog\nstatus: beta\nsummary: Modal dialog\ntags: [overlay, focus, overlay]\naliases:\n  - modal\n  - Lightbox\n---\n\n## Must Haves\n- Trap focus\n";
        let doc = ComponentDocument::parse(text, &web_react()).unwrap();
        let summary = &doc.summary;
        assert_eq!(summary.id, "dialog");
        assert_eq!(summary.stack, "web/react");
        assert_eq!(summary.status, PatternStatus::Beta);
        assert_eq!(summary.tags, vec!["focus", "overlay"]);
        assert_eq!(summary.aliases, vec!["Lightbox", "modal"]);
        assert_eq!(doc.body, "## Must Haves\n- Trap focus");
    }

    #[test]
    fn test_tags_dedup_is_case_sensitive() {
        let text = "---\nid: a\nsummary: s\ntags: [Form, form]\n---\n";
        let doc = ComponentDocument::parse(text, &web_react()).unwrap();
        assert_eq!(doc.summary.tags, vec!["Form", "form"]);
    }

    #[test]
    fn test_status_defaults_to_alpha() {
        let doc = ComponentDocument::parse("---\nid: a\nsummary: s\n---\n", &web_react()).unwrap();
        assert_eq!(doc.summary.status, PatternStatus::Alpha);
    }

    #[test]
    fn test_missing_id() {
        let err = ComponentDocument::parse("---\nsummary: s\n---\n", &web_react()).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("field 'id'"));
    }

    #[test]
    fn test_missing_summary() {
        let err = ComponentDocument::parse("---\nid: a\nsummary: \"\"\n---\n", &web_react())
            .unwrap_err();
        assert!(err.to_string().contains("field 'summary'"));
    }

    #[test]
    fn test_invalid_status() {
        let err = ComponentDocument::parse("---\nid: a\nsummary: s\nstatus: ga\n---\n", &web_react())
            .unwrap_err();
        assert!(err.to_string().contains("field 'status'"));
    }

    #[test]
    fn test_stack_mismatch() {
        let err =
            ComponentDocument::parse("---\nid: a\nsummary: s\nstack: web/vue\n---\n", &web_react())
                .unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("web/vue"));
    }

    #[test]
    fn test_matching_helpers() {
        let text = "---\nid: date-picker\nsummary: Choose a Date\ntags: [Form]\naliases: [Calendar]\n---\n";
        let summary = ComponentDocument::parse(text, &web_react()).unwrap().summary;
        assert!(summary.has_any_tag(&["form".to_string()]));
        assert!(!summary.has_any_tag(&["overlay".to_string()]));
        assert!(summary.matches_query("picker"));
        assert!(summary.matches_query("a date"));
        assert!(summary.matches_query("calendar"));
        assert!(!summary.matches_query("modal"));
    }

    #[test]
    fn test_tag_match_non_ascii() {
        let text = "---\nid: overview\nsummary: Page overview\ntags: [Überblick, ΣΥΝΟΨΗ]\n---\n";
        let summary = ComponentDocument::parse(text, &web_react()).unwrap().summary;
        assert!(summary.has_any_tag(&["überblick".to_string()]));
        assert!(summary.has_any_tag(&["συνοψη".to_string()]));
        assert!(!summary.has_any_tag(&["uberblick".to_string()]));
    }

    #[test]
    fn test_wrapped_summary_and_commented_tags() {
        let text = "---\nid: dialog\nsummary: Modal dialog that\n  traps focus\ntags: [overlay, focus] # nav tags\n---\n";
        let summary = ComponentDocument::parse(text, &web_react()).unwrap().summary;
        assert_eq!(summary.summary, "Modal dialog that traps focus");
        assert_eq!(summary.tags, vec!["focus", "overlay"]);
    }
}
