//! MCP tools for the pattern catalog.
//!
//! Provides `PatternTools`, a [`ToolRegistry`] over a shared
//! [`PatternCatalog`].

use std::sync::Arc;

use a11y_catalog::{GetGlobalRulesArgs, GetPatternArgs, ListPatternsArgs, PatternCatalog};
use rmcp::model::{CallToolResult, Content, ErrorData, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_schema(value: Value) -> Arc<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
    Tool::new(
        name.to_string(),
        description.to_string(),
        json_schema(schema),
    )
}

fn serialize_response<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: Value) -> Result<T, ErrorData> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ErrorData::invalid_params(e.to_string(), None))
}

fn stack_property() -> Value {
    json!({
        "type": "string",
        "description": "Stack identifier, e.g. \"web/react\". Defaults to the configured stack."
    })
}

// ---------------------------------------------------------------------------
// Argument and response types
// ---------------------------------------------------------------------------

/// Arguments for the `catalog_refresh` tool.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshArgs {
    /// Stack to evict; all stacks when omitted.
    pub stack: Option<String>,
}

/// Response from the `catalog_refresh` tool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Number of cached stack indexes dropped.
    pub evicted: usize,
}

// ---------------------------------------------------------------------------
// PatternTools
// ---------------------------------------------------------------------------

/// MCP tools for the pattern catalog.
///
/// Generates four tools:
/// - `list_patterns`: patterns for a stack, filtered by tags or text
/// - `get_pattern`: one pattern's structured sections
/// - `get_global_rules`: baseline rules, optionally filtered by scope
/// - `catalog_refresh`: drop cached indexes so the next query rebuilds
pub struct PatternTools {
    catalog: Arc<PatternCatalog>,
}

impl PatternTools {
    /// Create tools over a shared catalog.
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog these tools query.
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }
}

impl ToolRegistry for PatternTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool(
                "list_patterns",
                "List accessibility UI patterns for a stack, sorted by id",
                json!({
                    "type": "object",
                    "properties": {
                        "stack": stack_property(),
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Keep patterns having any of these tags (case-insensitive)"
                        },
                        "query": {
                            "type": "string",
                            "description": "Case-insensitive text matched against id, summary, and aliases"
                        }
                    }
                }),
            ),
            make_tool(
                "get_pattern",
                "Get one pattern's usage guidance, requirements, and golden example",
                json!({
                    "type": "object",
                    "properties": {
                        "stack": stack_property(),
                        "id": {
                            "type": "string",
                            "description": "Pattern id from list_patterns"
                        }
                    },
                    "required": ["id"]
                }),
            ),
            make_tool(
                "get_global_rules",
                "Get the baseline accessibility rules every component must follow",
                json!({
                    "type": "object",
                    "properties": {
                        "stack": stack_property(),
                        "scope": {
                            "oneOf": [
                                { "type": "string" },
                                { "type": "array", "items": { "type": "string" } }
                            ],
                            "description": "Keep rules for these scopes: utility, style, component, layout, page"
                        }
                    }
                }),
            ),
            make_tool(
                "catalog_refresh",
                "Drop cached pattern indexes so the next query re-reads the content",
                json!({
                    "type": "object",
                    "properties": {
                        "stack": {
                            "type": "string",
                            "description": "Stack to refresh; all stacks when omitted"
                        }
                    }
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let catalog = Arc::clone(&self.catalog);

        match name {
            "list_patterns" => Some(Box::pin(async move {
                let args: ListPatternsArgs = parse_args(args)?;
                let response = catalog
                    .list_patterns(args)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&response)
            })),

            "get_pattern" => Some(Box::pin(async move {
                let args: GetPatternArgs = parse_args(args)?;
                let response = catalog
                    .get_pattern(args)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&response)
            })),

            "get_global_rules" => Some(Box::pin(async move {
                let args: GetGlobalRulesArgs = parse_args(args)?;
                let response = catalog
                    .get_global_rules(args)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&response)
            })),

            "catalog_refresh" => Some(Box::pin(async move {
                let args: RefreshArgs = parse_args(args)?;
                let evicted = catalog
                    .refresh(args.stack.as_deref())
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&RefreshResponse { evicted })
            })),

            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
