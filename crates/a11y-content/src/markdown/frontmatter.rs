//! YAML frontmatter extraction from markdown documents.
//!
//! Frontmatter is metadata at the start of a document, delimited by `---`:
//!
//! ```markdown
//! ---
//! id: dialog
//! status: stable
//! summary: "Modal dialog that traps focus"
//! tags: [overlay, focus]
//! aliases:
//!   - modal
//!   - lightbox
//! ---
//!
//! ## Use When
//! ...
//! ```
//!
//! The block is decoded as YAML into a mapping. Accessors trim strings and
//! drop empty list entries; schema checks (required fields, enum membership)
//! belong to the caller.
//!
//! # Usage
//!
//! ```rust
//! use a11y_content::markdown::extract_frontmatter;
//!
//! let doc = extract_frontmatter("---\nid: dialog\ntags: [overlay]\n---\n\n## Use When\n").unwrap();
//! assert_eq!(doc.get_str("id"), Some("dialog"));
//! assert_eq!(doc.get_string_list("tags"), vec!["overlay"]);
//! assert_eq!(doc.body(), "## Use When");
//! ```

use a11y_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// A document split into decoded frontmatter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterResult {
    metadata: Mapping,
    body: String,
}

impl FrontmatterResult {
    /// All decoded top-level keys.
    pub fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    /// Body after the closing fence, newline-normalized and trimmed.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Take ownership of the body.
    pub fn into_body(self) -> String {
        self.body
    }

    /// Get a raw value. A key present with no value counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key).filter(|v| !v.is_null())
    }

    /// Deserialize the frontmatter into a specific type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_value(Value::Mapping(self.metadata.clone()))
            .map_err(|e| Error::malformed_field("frontmatter", e.to_string()))
    }

    /// Get a trimmed string, treating empty strings as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(scalar_str)
    }

    /// Get a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Get a non-negative integer. A quoted number is accepted.
    ///
    /// Returns `Ok(None)` if the key is missing and a malformed-content
    /// error naming `key` if the value is not a whole number.
    pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
            .map(Some)
            .ok_or_else(|| {
                Error::malformed_field(
                    key,
                    format!("'{}' is not a whole number", display_scalar(value)),
                )
            })
    }

    /// Get a string list. Returns an empty vec if the key is missing.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key).map(string_list).unwrap_or_default()
    }

    /// Get a nested mapping.
    pub fn get_map(&self, key: &str) -> Option<&Mapping> {
        self.get(key).and_then(Value::as_mapping)
    }
}

/// Trimmed content of a string value, `None` if empty or not a string.
pub fn scalar_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Items of a sequence as trimmed strings, empty entries dropped.
///
/// Numbers and booleans are rendered as text. A non-empty scalar counts as
/// a one-item list; anything else yields an empty list.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(scalar_text)
            .filter(|s| !s.is_empty())
            .collect(),
        other => scalar_text(other)
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn display_scalar(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| format!("{value:?}"))
}

/// Split a document into frontmatter and body.
///
/// The first line must be a `---` fence and a later line must close it,
/// and the block between must be a YAML mapping (or empty). Anything else
/// fails with a malformed-content error on the `frontmatter` field.
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult> {
    let normalized = content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    if lines.first().map(|l| l.trim_end()) != Some("---") {
        return Err(Error::malformed_field(
            "frontmatter",
            "document must start with a '---' line",
        ));
    }

    let close = lines
        .iter()
        .skip(1)
        .position(|l| l.trim_end() == "---")
        .map(|pos| pos + 1)
        .ok_or_else(|| Error::malformed_field("frontmatter", "closing '---' line not found"))?;

    let yaml = lines[1..close].join("\n");
    let metadata = match serde_yaml::from_str::<Value>(&yaml) {
        Ok(Value::Mapping(map)) => map,
        Ok(Value::Null) => Mapping::new(),
        Ok(_) => {
            return Err(Error::malformed_field(
                "frontmatter",
                "frontmatter must be a mapping of keys to values",
            ));
        }
        Err(e) => {
            return Err(Error::malformed_field(
                "frontmatter",
                format!("invalid YAML: {e}"),
            ));
        }
    };
    let body = lines[close + 1..].join("\n").trim().to_string();

    Ok(FrontmatterResult { metadata, body })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    // ------------------------------------------------------------------------
    // Delimiter tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_basic() {
        let doc = extract_frontmatter("---\nid: dialog\nsummary: A dialog\n---\n\n## Use When\n- x\n")
            .unwrap();
        assert_eq!(doc.get_str("id"), Some("dialog"));
        assert_eq!(doc.get_str("summary"), Some("A dialog"));
        assert_eq!(doc.body(), "## Use When\n- x");
    }

    #[test]
    fn test_missing_opening_fence_fails() {
        let err = extract_frontmatter("# Title\n\nid: x").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("frontmatter"));
    }

    #[test]
    fn test_missing_closing_fence_fails() {
        let err = extract_frontmatter("---\nid: x\n\nbody").unwrap_err();
        assert!(err.to_string().contains("closing"));
    }

    #[test]
    fn test_empty_frontmatter() {
        let doc = extract_frontmatter("---\n---\nBody").unwrap();
        assert!(doc.metadata().is_empty());
        assert_eq!(doc.body(), "Body");
    }

    #[test]
    fn test_crlf_and_bom_normalized() {
        let doc = extract_frontmatter("\u{feff}---\r\nid: x\r\n---\r\n\r\nline one\r\nline two\r\n")
            .unwrap();
        assert_eq!(doc.get_str("id"), Some("x"));
        assert_eq!(doc.body(), "line one\nline two");
    }

    #[test]
    fn test_body_dashes_not_a_fence() {
        let doc = extract_frontmatter("---\nid: x\n---\nbefore\n---\nafter").unwrap();
        assert_eq!(doc.body(), "before\n---\nafter");
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let err = extract_frontmatter("---\nid: [unclosed\n---\nBody").unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_non_mapping_frontmatter_fails() {
        let err = extract_frontmatter("---\n- just\n- a list\n---\n").unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    // ------------------------------------------------------------------------
    // Scalar tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_quoted_scalars() {
        let doc = extract_frontmatter(
            "---\na: \"double: quoted\"\nb: 'single'\nc:   bare value  \nd: \"  padded \"\n---\n",
        )
        .unwrap();
        assert_eq!(doc.get_str("a"), Some("double: quoted"));
        assert_eq!(doc.get_str("b"), Some("single"));
        assert_eq!(doc.get_str("c"), Some("bare value"));
        assert_eq!(doc.get_str("d"), Some("padded"));
    }

    #[test]
    fn test_comments_and_booleans() {
        let doc = extract_frontmatter(
            "---\n# leading comment\nexperimental: true # flag\nhidden: false\nid: x # trailing\nsummary: \"a # b\" # note\n---\n",
        )
        .unwrap();
        assert_eq!(doc.get_bool("experimental"), Some(true));
        assert_eq!(doc.get_bool("hidden"), Some(false));
        assert_eq!(doc.get_str("id"), Some("x"));
        assert_eq!(doc.get_str("summary"), Some("a # b"));
    }

    #[test]
    fn test_wrapped_plain_scalar() {
        let doc = extract_frontmatter(
            "---\nsummary: Modal dialog that\n  traps focus\nid: dialog\n---\n",
        )
        .unwrap();
        assert_eq!(doc.get_str("summary"), Some("Modal dialog that traps focus"));
        assert_eq!(doc.get_str("id"), Some("dialog"));
    }

    #[test]
    fn test_get_u64() {
        let doc = extract_frontmatter(
            "---\nttl: 86400\nquoted: \"300\"\nword: soon\nnegative: -5\n---\n",
        )
        .unwrap();
        assert_eq!(doc.get_u64("ttl").unwrap(), Some(86400));
        assert_eq!(doc.get_u64("quoted").unwrap(), Some(300));
        assert_eq!(doc.get_u64("missing").unwrap(), None);

        let err = doc.get_u64("word").unwrap_err();
        assert!(err.to_string().contains("field 'word'"));
        assert!(err.to_string().contains("'soon'"));
        assert!(doc.get_u64("negative").is_err());
    }

    #[test]
    fn test_empty_value_is_absent() {
        let doc = extract_frontmatter("---\nsummary:\nid: x\nblank: \"  \"\n---\n").unwrap();
        assert_eq!(doc.get_str("summary"), None);
        assert!(doc.get("summary").is_none());
        assert_eq!(doc.get_str("blank"), None);
        assert_eq!(doc.get_str("id"), Some("x"));
    }

    #[test]
    fn test_block_scalars() {
        let doc = extract_frontmatter(
            "---\nsummary: >\n  Folded line one\n  and two\nnotes: |\n  keep\n  lines\nid: x\n---\n",
        )
        .unwrap();
        assert_eq!(doc.get_str("summary"), Some("Folded line one and two"));
        assert_eq!(doc.get_str("notes"), Some("keep\nlines"));
        assert_eq!(doc.get_str("id"), Some("x"));
    }

    // ------------------------------------------------------------------------
    // List tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_inline_list() {
        let doc = extract_frontmatter("---\ntags: [ overlay, \"focus, trap\", \"\", ' modal ' ]\n---\n")
            .unwrap();
        assert_eq!(doc.get_string_list("tags"), vec!["overlay", "focus, trap", "modal"]);
    }

    #[test]
    fn test_inline_list_with_trailing_comment() {
        let doc = extract_frontmatter("---\ntags: [overlay, focus] # nav tags\n---\n").unwrap();
        assert_eq!(doc.get_string_list("tags"), vec!["overlay", "focus"]);
    }

    #[test]
    fn test_empty_inline_list() {
        let doc = extract_frontmatter("---\ntags: []\n---\n").unwrap();
        assert!(doc.get_string_list("tags").is_empty());
    }

    #[test]
    fn test_block_list_indented_and_flush() {
        let doc = extract_frontmatter(
            "---\naliases:\n  - modal\n  - \"lightbox\"\ntags:\n- a\n- b\nid: x\n---\n",
        )
        .unwrap();
        assert_eq!(doc.get_string_list("aliases"), vec!["modal", "lightbox"]);
        assert_eq!(doc.get_string_list("tags"), vec!["a", "b"]);
        assert_eq!(doc.get_str("id"), Some("x"));
    }

    #[test]
    fn test_scalar_and_number_items() {
        let doc = extract_frontmatter("---\ntags: overlay\nlevels: [2, true]\n---\n").unwrap();
        assert_eq!(doc.get_string_list("tags"), vec!["overlay"]);
        assert_eq!(doc.get_string_list("levels"), vec!["2", "true"]);
        assert!(doc.get_string_list("missing").is_empty());
    }

    // ------------------------------------------------------------------------
    // Nested mapping tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_nested_map() {
        let doc = extract_frontmatter(
            "---\napply_policy:\n  instruction: \"Apply in order\"\n  scopes_in_order: [utility, page]\nid: x\n---\n",
        )
        .unwrap();
        let policy = doc.get_map("apply_policy").unwrap();
        assert_eq!(policy.get("instruction").and_then(scalar_str), Some("Apply in order"));
        assert_eq!(
            policy.get("scopes_in_order").map(string_list).unwrap(),
            vec!["utility", "page"]
        );
        assert_eq!(doc.get_str("id"), Some("x"));
    }

    #[test]
    fn test_deserialize_typed() {
        #[derive(Debug, Deserialize)]
        struct Meta {
            id: String,
            #[serde(default)]
            tags: Vec<String>,
        }

        let doc = extract_frontmatter("---\nid: x\ntags: [a, b]\nextra: 1\n---\n").unwrap();
        let meta: Meta = doc.deserialize().unwrap();
        assert_eq!(meta.id, "x");
        assert_eq!(meta.tags, vec!["a", "b"]);

        let err = extract_frontmatter("---\ntags: [a]\n---\n")
            .unwrap()
            .deserialize::<Meta>()
            .unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn test_urls_are_plain_values() {
        let doc = extract_frontmatter("---\nsource: https://example.com/a\n---\n").unwrap();
        assert_eq!(doc.get_str("source"), Some("https://example.com/a"));
    }
}
