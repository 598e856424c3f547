//! Selection catalog (`patterns.json`) decoding.
//!
//! The catalog is a JSON sidecar that gives each pattern a short excerpt of
//! when (not) to use it. Three top-level shapes are accepted:
//!
//! ```json
//! [ { "id": "dialog", "use_when": ["..."] } ]
//! { "patterns": [ ... ] }
//! { "items": [ ... ] }
//! ```
//!
//! Within an entry the two lists may sit at the top level or under a
//! `selection` / `selection_excerpt` object. Excerpt strings are
//! whitespace-collapsed and capped at [`MAX_EXCERPT_CHARS`] characters, and
//! each list keeps at most [`MAX_EXCERPT_ITEMS`] entries. Oversized input is
//! truncated, never rejected.

use std::collections::HashMap;

use a11y_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum entries kept per excerpt list.
pub const MAX_EXCERPT_ITEMS: usize = 3;

/// Maximum characters per excerpt entry, including the ellipsis.
pub const MAX_EXCERPT_CHARS: usize = 140;

/// Short selection guidance attached to a pattern summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionExcerpt {
    pub use_when: Vec<String>,
    pub do_not_use_when: Vec<String>,
}

impl SelectionExcerpt {
    /// Returns `true` if both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.use_when.is_empty() && self.do_not_use_when.is_empty()
    }
}

/// Decoded selection catalog, keyed by pattern id.
#[derive(Debug, Clone, Default)]
pub struct SelectionCatalog {
    by_id: HashMap<String, SelectionExcerpt>,
}

impl SelectionCatalog {
    /// Decode catalog JSON.
    ///
    /// Invalid JSON is malformed content. A valid document of an unknown
    /// shape yields an empty catalog and a warning.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::malformed_field("patterns.json", format!("invalid JSON: {e}")))?;

        let entries = match &value {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => match map.get("patterns").or_else(|| map.get("items")) {
                Some(Value::Array(items)) => items.as_slice(),
                _ => {
                    log::warn!("Selection catalog has no 'patterns' or 'items' array; ignoring it");
                    &[]
                }
            },
            _ => {
                log::warn!("Selection catalog is neither an array nor an object; ignoring it");
                &[]
            }
        };

        let mut by_id = HashMap::new();
        for entry in entries {
            let Some(id) = entry.get("id").and_then(Value::as_str).map(str::trim) else {
                log::debug!("Skipping selection catalog entry without an id");
                continue;
            };
            if id.is_empty() {
                continue;
            }
            let excerpt = decode_excerpt(entry);
            if !excerpt.is_empty() {
                by_id.entry(id.to_string()).or_insert(excerpt);
            }
        }

        Ok(Self { by_id })
    }

    /// Excerpt for a pattern id, if the catalog has one.
    pub fn excerpt_for(&self, id: &str) -> Option<&SelectionExcerpt> {
        self.by_id.get(id)
    }

    /// Number of patterns with an excerpt.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns `true` if no pattern has an excerpt.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn decode_excerpt(entry: &Value) -> SelectionExcerpt {
    let holder = ["selection", "selection_excerpt"]
        .iter()
        .find_map(|key| entry.get(*key).filter(|v| v.is_object()))
        .unwrap_or(entry);

    SelectionExcerpt {
        use_when: excerpt_list(holder.get("use_when")),
        do_not_use_when: excerpt_list(holder.get("do_not_use_when")),
    }
}

fn excerpt_list(value: Option<&Value>) -> Vec<String> {
    let items: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(single)) => vec![single.as_str()],
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(clip_excerpt)
        .filter(|s| !s.is_empty())
        .take(MAX_EXCERPT_ITEMS)
        .collect()
}

/// Collapse whitespace and cap the length at [`MAX_EXCERPT_CHARS`].
pub fn clip_excerpt(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_EXCERPT_CHARS {
        return collapsed;
    }
    let mut clipped: String = collapsed.chars().take(MAX_EXCERPT_CHARS - 1).collect();
    clipped.truncate(clipped.trim_end().len());
    clipped.push('…');
    clipped
}

// ============================================================================
// Tests
// ============================================================================
