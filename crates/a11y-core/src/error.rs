//! Error types for the a11y pattern catalog.
//!
//! Every crate in the workspace reports failures through [`Error`]. The
//! variants separate the outcomes a client needs to tell apart:
//!
//! - [`Error::Config`]: the content repository is not laid out as expected
//! - [`Error::MalformedContent`]: an authored document violates its schema
//! - [`Error::NotFound`]: a requested pattern does not exist
//! - [`Error::StackMismatch`]: a query was run against another stack's index
//! - [`Error::InvalidArgument`]: a query argument is unusable

use std::path::{Path, PathBuf};

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while indexing, parsing, or querying patterns.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Missing baseline/catalog file or unusable configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What is misconfigured
        message: String,
    },

    /// An authored document violates the expected format.
    #[error("Malformed content{}{}: {message}", path_suffix(.path), field_suffix(.field))]
    MalformedContent {
        /// File the content came from, once known
        path: Option<PathBuf>,
        /// Field or section that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A requested resource does not exist.
    #[error("{resource} not found: {id}{}", suggestion_suffix(.suggestions))]
    NotFound {
        /// Kind of resource (e.g. "pattern")
        resource: String,
        /// Identifier that was looked up
        id: String,
        /// Closest known identifiers, best first
        suggestions: Vec<String>,
    },

    /// A query named a different stack than the index it was run against.
    #[error("Stack mismatch: expected '{expected}', got '{found}'")]
    StackMismatch {
        /// Stack of the index
        expected: String,
        /// Stack named by the caller
        found: String,
    },

    /// A query argument could not be used.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What is wrong with the argument
        message: String,
    },

    /// File could not be read.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|f| format!(" (field '{f}')"))
        .unwrap_or_default()
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a malformed-content error without a field name.
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Error::MalformedContent {
            path: None,
            field: None,
            message: message.into(),
        }
    }

    /// Creates a malformed-content error naming the offending field.
    pub fn malformed_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::MalformedContent {
            path: None,
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a not-found error for a resource kind and id.
    pub fn not_found<R, I>(resource: R, id: I) -> Self
    where
        R: Into<String>,
        I: Into<String>,
    {
        Error::NotFound {
            resource: resource.into(),
            id: id.into(),
            suggestions: Vec::new(),
        }
    }

    /// Creates a stack-mismatch error.
    pub fn stack_mismatch<E, F>(expected: E, found: F) -> Self
    where
        E: Into<String>,
        F: Into<String>,
    {
        Error::StackMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an I/O error carrying the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attaches a file path to a malformed-content error that has none yet.
    ///
    /// Parsers work on text and do not know where it came from; callers that
    /// read the file attach the path on the way out. Other variants pass
    /// through unchanged.
    pub fn with_path(self, file: impl AsRef<Path>) -> Self {
        match self {
            Error::MalformedContent {
                path: None,
                field,
                message,
            } => Error::MalformedContent {
                path: Some(file.as_ref().to_path_buf()),
                field,
                message,
            },
            other => other,
        }
    }

    /// Attaches near-miss suggestions to a not-found error.
    pub fn with_suggestions(self, suggestions: Vec<String>) -> Self {
        match self {
            Error::NotFound { resource, id, .. } => Error::NotFound {
                resource,
                id,
                suggestions,
            },
            other => other,
        }
    }

    /// Stable machine-readable label for this error's category.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config { .. } => "configuration_error",
            Error::MalformedContent { .. } => "malformed_content",
            Error::NotFound { .. } => "not_found",
            Error::StackMismatch { .. } => "stack_mismatch",
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::Io { .. } => "io_error",
            Error::Json(_) => "serialization_error",
        }
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns `true` for [`Error::MalformedContent`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedContent { .. })
    }

    /// File path carried by a malformed-content or I/O error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::MalformedContent { path, .. } => path.as_deref(),
            Error::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}
