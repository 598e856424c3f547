//! Catalog errors → MCP protocol errors.

use a11y_core::Error;
use rmcp::model::ErrorData;
use serde_json::json;

/// Convert a catalog error into an MCP error.
///
/// | Catalog error                         | MCP error            |
/// |---------------------------------------|----------------------|
/// | `NotFound`                            | `resource_not_found` |
/// | `InvalidArgument`, `StackMismatch`    | `invalid_params`     |
/// | everything else                       | `internal_error`     |
///
/// The error's [`Error::kind`] is attached as `{"kind": ...}` data so
/// clients can tell bad content from a missing pattern. Not-found errors also
/// carry their `suggestions`.
pub trait McpErrorExt {
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for Error {
    fn to_mcp_error(&self) -> ErrorData {
        let message = self.to_string();
        match self {
            Error::NotFound { suggestions, .. } => ErrorData::resource_not_found(
                message,
                Some(json!({ "kind": self.kind(), "suggestions": suggestions })),
            ),
            Error::InvalidArgument { .. } | Error::StackMismatch { .. } => {
                ErrorData::invalid_params(message, Some(json!({ "kind": self.kind() })))
            }
            _ => {
                log::warn!("Catalog request failed: {message}");
                ErrorData::internal_error(message, Some(json!({ "kind": self.kind() })))
            }
        }
    }
}
