//! The `yaml` header block at the top of each rule.
//!
//! ```yaml
//! id: global.page-title
//! scope: [page, layout]
//! ```
//!
//! or
//!
//! ```yaml
//! id: global.focus-visible
//! scope:
//!   - component
//!   - utility
//! ```
//!
//! Only `id` and `scope` are read and only these two scope shapes are
//! understood. A bare scalar such as `scope: page` yields no scope tokens
//! and is rejected by the caller like any other empty scope.

/// Raw `id` and `scope` tokens from a rule header, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RuleHeader {
    pub id: String,
    pub scope: Vec<String>,
}

/// Read `id` and `scope` from the code of a rule's `yaml` fence.
pub(crate) fn parse_rule_header(code: &str) -> RuleHeader {
    let mut header = RuleHeader::default();
    let mut in_scope_list = false;

    for line in code.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let unindented = !line.starts_with([' ', '\t']);
        if in_scope_list {
            if let Some(item) = trimmed.strip_prefix('-') {
                let item = unquote(strip_comment(item.trim()));
                if !item.is_empty() {
                    header.scope.push(item);
                }
                continue;
            }
            if unindented && trimmed.contains(':') {
                in_scope_list = false;
            } else {
                continue;
            }
        }

        if !unindented {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let value = strip_comment(value.trim());
        match key.trim() {
            "id" => header.id = unquote(value),
            "scope" => {
                if value.is_empty() {
                    in_scope_list = true;
                } else if let Some(inner) = value
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                {
                    header.scope = parse_inline_list(inner);
                } else {
                    log::debug!("Ignoring scalar rule scope '{value}'");
                }
            }
            _ => {}
        }
    }

    header
}

// ============================================================================
// Value helpers
// ============================================================================

/// Split the inside of `[...]` on commas outside quotes.
fn parse_inline_list(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in inner.chars() {
        match (quote, c) {
            (None, '"' | '\'') => {
                quote = Some(c);
                current.push(c);
            }
            (Some(q), _) if c == q => {
                quote = None;
                current.push(c);
            }
            (None, ',') => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);

    items
        .into_iter()
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Drop a trailing ` # comment`. A quoted value ends at its closing quote.
fn strip_comment(value: &str) -> &str {
    if let Some(q) = value.chars().next().filter(|&c| matches!(c, '"' | '\'')) {
        return match value[1..].find(q) {
            Some(end) => &value[..end + 2],
            None => value,
        };
    }
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}

/// Remove one layer of matching quotes and trim.
fn unquote(value: &str) -> String {
    let value = value.trim();
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return value[1..value.len() - 1].trim().to_string();
        }
    }
    value.to_string()
}

// ============================================================================
// Tests
// ============================================================================
