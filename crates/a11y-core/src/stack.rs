//! Stack identifiers.
//!
//! A stack (e.g. `web/react`) selects one subtree of the content repository.
//! It is always two path segments, `<group>/<name>`, and is used verbatim as
//! a relative path, so parsing rejects anything that could escape the
//! `patterns/` directory.

use std::fmt;
use std::path::PathBuf;

use crate::{Error, Result};

/// A validated `<group>/<name>` stack identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stack {
    group: String,
    name: String,
}

impl Stack {
    /// Parse and normalize a stack identifier.
    ///
    /// Surrounding whitespace and slashes are trimmed and backslashes are
    /// treated as forward slashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use a11y_core::Stack;
    ///
    /// let stack = Stack::parse(" /web\\react/ ").unwrap();
    /// assert_eq!(stack.as_string(), "web/react");
    /// assert!(Stack::parse("web").is_err());
    /// assert!(Stack::parse("web/../etc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().replace('\\', "/");
        let normalized = normalized.trim_matches('/');

        if normalized.is_empty() {
            return Err(Error::invalid_argument("stack must not be empty"));
        }

        let segments: Vec<&str> = normalized.split('/').collect();
        let [group, name] = segments.as_slice() else {
            return Err(Error::invalid_argument(format!(
                "stack '{raw}' must have the form <group>/<name>"
            )));
        };

        for segment in [group, name] {
            if segment.is_empty() || *segment == "." || *segment == ".." {
                return Err(Error::invalid_argument(format!(
                    "stack '{raw}' contains an invalid segment '{segment}'"
                )));
            }
        }

        Ok(Self {
            group: (*group).to_string(),
            name: (*name).to_string(),
        })
    }

    /// The group segment (e.g. `web`).
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The name segment (e.g. `react`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical `<group>/<name>` form.
    pub fn as_string(&self) -> String {
        format!("{}/{}", self.group, self.name)
    }

    /// Relative directory of this stack below the content root.
    pub fn relative_dir(&self) -> PathBuf {
        PathBuf::from("patterns").join(&self.group).join(&self.name)
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}

impl std::str::FromStr for Stack {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
