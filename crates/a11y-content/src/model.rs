//! Closed vocabularies shared by pattern and rule documents.

use std::fmt;

use a11y_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a pattern or rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStatus {
    /// Early draft; guidance may change substantially.
    Alpha,
    /// Usable, still collecting feedback.
    Beta,
    /// Recommended guidance.
    Stable,
    /// Kept for reference; do not use for new work.
    Deprecated,
}

impl PatternStatus {
    /// All values, in lifecycle order.
    pub const ALL: [PatternStatus; 4] = [Self::Alpha, Self::Beta, Self::Stable, Self::Deprecated];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Stable => "stable",
            Self::Deprecated => "deprecated",
        }
    }

    /// Parse a frontmatter `status` value (case-insensitive).
    ///
    /// Failure is a malformed-content error on the `status` field.
    pub fn parse(raw: &str) -> Result<Self> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == wanted)
            .ok_or_else(|| {
                Error::malformed_field(
                    "status",
                    format!("'{raw}' is not one of alpha, beta, stable, deprecated"),
                )
            })
    }
}

impl fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in a UI a baseline rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeTag {
    /// Shared helpers (focus utilities, visually-hidden text).
    Utility,
    /// Styling concerns (contrast, motion).
    Style,
    /// Individual components.
    Component,
    /// Layout regions and landmarks.
    Layout,
    /// Whole pages (titles, language, skip links).
    Page,
}

impl ScopeTag {
    /// All values.
    pub const ALL: [ScopeTag; 5] = [
        Self::Utility,
        Self::Style,
        Self::Component,
        Self::Layout,
        Self::Page,
    ];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::Style => "style",
            Self::Component => "component",
            Self::Layout => "layout",
            Self::Page => "page",
        }
    }

    /// Parse a scope token (case-insensitive). Returns `None` if unknown.
    pub fn from_token(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == wanted)
    }

    /// Parse, reporting an unknown token as malformed content on `field`.
    pub fn parse_field(raw: &str, field: &str) -> Result<Self> {
        Self::from_token(raw).ok_or_else(|| {
            Error::malformed_field(
                field,
                format!("'{raw}' is not one of utility, style, component, layout, page"),
            )
        })
    }

    /// Normalize a list of tokens: validate, de-duplicate, and sort
    /// lexicographically by name.
    pub fn normalize_list<S: AsRef<str>>(tokens: &[S], field: &str) -> Result<Vec<Self>> {
        let mut scopes = tokens
            .iter()
            .map(|t| Self::parse_field(t.as_ref(), field))
            .collect::<Result<Vec<_>>>()?;
        scopes.sort_by_key(|s| s.as_str());
        scopes.dedup();
        Ok(scopes)
    }
}

impl fmt::Display for ScopeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(PatternStatus::parse("stable").unwrap(), PatternStatus::Stable);
        assert_eq!(PatternStatus::parse(" Beta ").unwrap(), PatternStatus::Beta);
        let err = PatternStatus::parse("final").unwrap_err();
        assert!(err.to_string().contains("field 'status'"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PatternStatus::Deprecated).unwrap();
        assert_eq!(json, "\"deprecated\"");
    }

    #[test]
    fn test_scope_normalize_list_sorts_and_dedups() {
        let scopes = ScopeTag::normalize_list(&["Page", "utility", "page", "component"], "scope")
            .unwrap();
        assert_eq!(
            scopes,
            vec![ScopeTag::Component, ScopeTag::Page, ScopeTag::Utility]
        );
    }

    #[test]
    fn test_scope_unknown_token() {
        let err = ScopeTag::normalize_list(&["page", "widget"], "scope").unwrap_err();
        assert!(err.to_string().contains("'widget'"));
        assert!(err.to_string().contains("field 'scope'"));
    }
}
