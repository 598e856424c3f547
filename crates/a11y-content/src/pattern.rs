//! Pattern document body → fixed section schema.
//!
//! A component pattern's body is organized under `##` headings. Six labels
//! are recognized (case-insensitively, with trailing `:`/`.` and curly
//! apostrophes tolerated):
//!
//! | Heading            | Field             |
//! |--------------------|-------------------|
//! | Use When           | `use_when`        |
//! | Do Not Use When    | `do_not_use_when` |
//! | Must Haves         | `must_haves`      |
//! | Customizable       | `customizable`    |
//! | Don'ts / Donts     | `donts`           |
//! | Golden Pattern     | `golden_pattern`  |
//!
//! Any other heading is ignored. All sections but the golden pattern become
//! bullet lists; the golden pattern is kept as raw markdown so its code
//! fences can be rendered as-is.

use serde::{Deserialize, Serialize};

use crate::markdown::blocks::{HeadingPattern, normalize_heading_label, split_by_heading, to_bullet_list};

/// Structured sections of a pattern document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSections {
    /// Situations where the pattern is the right choice.
    pub use_when: Vec<String>,
    /// Situations where another pattern fits better.
    pub do_not_use_when: Vec<String>,
    /// Non-negotiable accessibility requirements.
    pub must_haves: Vec<String>,
    /// What implementers may change.
    pub customizable: Vec<String>,
    /// Known mistakes.
    pub donts: Vec<String>,
    /// Reference implementation as raw markdown, `None` if absent or empty.
    pub golden_pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    UseWhen,
    DoNotUseWhen,
    MustHaves,
    Customizable,
    Donts,
    GoldenPattern,
}

impl SectionKind {
    fn from_label(label: &str) -> Option<Self> {
        match normalize_heading_label(label).as_str() {
            "use when" => Some(Self::UseWhen),
            "do not use when" => Some(Self::DoNotUseWhen),
            "must haves" => Some(Self::MustHaves),
            "customizable" => Some(Self::Customizable),
            "don'ts" | "donts" => Some(Self::Donts),
            "golden pattern" => Some(Self::GoldenPattern),
            _ => None,
        }
    }
}

/// Map a pattern body to [`PatternSections`].
///
/// A heading that appears more than once contributes all of its bullets, in
/// document order; for the golden pattern the first non-empty one wins.
///
/// ```rust
/// use a11y_content::pattern::extract_sections;
///
/// let sections = extract_sections("## Must Haves\n- A\n  - A1\n  - A2\n- B");
/// assert_eq!(sections.must_haves, vec!["A\n  - A1\n  - A2", "B"]);
/// assert!(sections.golden_pattern.is_none());
/// ```
pub fn extract_sections(body: &str) -> PatternSections {
    let mut sections = PatternSections::default();

    for segment in split_by_heading(body, HeadingPattern::Section) {
        let Some(kind) = segment.title.as_deref().and_then(SectionKind::from_label) else {
            continue;
        };
        let target = match kind {
            SectionKind::UseWhen => &mut sections.use_when,
            SectionKind::DoNotUseWhen => &mut sections.do_not_use_when,
            SectionKind::MustHaves => &mut sections.must_haves,
            SectionKind::Customizable => &mut sections.customizable,
            SectionKind::Donts => &mut sections.donts,
            SectionKind::GoldenPattern => {
                let raw = segment.body.trim();
                if sections.golden_pattern.is_none() && !raw.is_empty() {
                    sections.golden_pattern = Some(raw.to_string());
                }
                continue;
            }
        };
        target.extend(to_bullet_list(&segment.body));
    }

    sections
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DIALOG_BODY: &str = r#"
Short intro that is not a section.

## Use When
- A task needs the user's full attention
- The user must confirm a destructive action

## Do not use when:
- Content is purely informational

## Must Haves
- Move focus into the dialog on open
  - Prefer the first focusable control
- Return focus to the trigger on close

## Customizable
* Width and padding

## Don’ts
1. Nest dialogs

## Related Patterns
- popover

## Golden Pattern

```tsx
<Dialog aria-labelledby="title">
  <h2 id="title">Delete file?</h2>
</Dialog>
```
"#;

    #[test]
    fn test_extract_all_sections() {
        let sections = extract_sections(DIALOG_BODY);

        assert_eq!(
            sections.use_when,
            vec![
                "A task needs the user's full attention",
                "The user must confirm a destructive action"
            ]
        );
        assert_eq!(sections.do_not_use_when, vec!["Content is purely informational"]);
        assert_eq!(
            sections.must_haves,
            vec![
                "Move focus into the dialog on open\n  - Prefer the first focusable control",
                "Return focus to the trigger on close"
            ]
        );
        assert_eq!(sections.customizable, vec!["Width and padding"]);
        assert_eq!(sections.donts, vec!["Nest dialogs"]);

        let golden = sections.golden_pattern.unwrap();
        assert!(golden.starts_with("```tsx"));
        assert!(golden.ends_with("```"));
        assert!(golden.contains("<h2 id=\"title\">"));
    }

    #[test]
    fn test_unknown_sections_ignored() {
        let sections = extract_sections("## Related Patterns\n- popover\n## Notes\n- x");
        assert_eq!(sections, PatternSections::default());
    }

    #[test]
    fn test_missing_sections_are_empty_lists() {
        let sections = extract_sections("## Must Haves\n- A\n- B");
        assert_eq!(sections.must_haves, vec!["A", "B"]);
        assert!(sections.use_when.is_empty());
        assert!(sections.donts.is_empty());
    }

    #[test]
    fn test_golden_pattern_empty_is_none() {
        let sections = extract_sections("## Golden Pattern\n\n   \n## Donts\n- x");
        assert!(sections.golden_pattern.is_none());
        assert_eq!(sections.donts, vec!["x"]);
    }

    #[test]
    fn test_golden_pattern_keeps_inner_headings() {
        let body = "## Golden Pattern\n### Markup\n```html\n<button>Save</button>\n```";
        let sections = extract_sections(body);
        assert_eq!(
            sections.golden_pattern.as_deref(),
            Some("### Markup\n```html\n<button>Save</button>\n```")
        );
    }

    #[test]
    fn test_label_variants() {
        let body = "## USE WHEN:\n- a\n## Donts.\n- b\n## Must\u{a0}Haves\n- c";
        let sections = extract_sections(body);
        assert_eq!(sections.use_when, vec!["a"]);
        assert_eq!(sections.donts, vec!["b"]);
        assert_eq!(sections.must_haves, vec!["c"]);
    }

    #[test]
    fn test_repeated_heading_appends() {
        let sections = extract_sections("## Must Haves\n- a\n## Must Haves\n- b");
        assert_eq!(sections.must_haves, vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_null_golden_pattern() {
        let json = serde_json::to_value(PatternSections::default()).unwrap();
        assert!(json["golden_pattern"].is_null());
        assert!(json["must_haves"].as_array().unwrap().is_empty());
    }
}
