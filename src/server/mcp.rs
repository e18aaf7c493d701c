//! MCP protocol implementation for JSON-RPC 2.0 communication.
//!
//! This module provides the core MCP server implementation including:
//! - JSON-RPC 2.0 request/response handling
//! - Tool definitions and schemas
//! - Stdio-based server communication

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use super::{handle_tool_call, AppState};

#[cfg(test)]
#[path = "mcp_tests.rs"]
mod mcp_tests;

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (must be "2.0").
    pub jsonrpc: String,
    /// Request identifier (None for notifications).
    pub id: Option<Value>,
    /// The method name to invoke.
    pub method: String,
    /// Optional parameters for the method.
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request identifier (null when the request id could not be read).
    pub id: Value,
    /// The result on success (mutually exclusive with error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error on failure (mutually exclusive with result).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (negative for predefined errors).
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP server information returned during initialization.
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    /// The server name identifier.
    pub name: String,
    /// The server version string.
    pub version: String,
}

/// MCP server capabilities advertised to clients.
#[derive(Debug, Serialize)]
pub struct Capabilities {
    /// Tool-related capabilities.
    pub tools: ToolCapabilities,
}

/// Tool-specific capabilities.
#[derive(Debug, Serialize)]
pub struct ToolCapabilities {
    /// Whether the tool list can change dynamically.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Result of the MCP initialize handshake.
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    /// The MCP protocol version supported.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities.
    pub capabilities: Capabilities,
    /// Server identification information.
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// MCP tool definition with JSON Schema.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    /// Unique tool name (used in tool calls).
    pub name: String,
    /// Human-readable description of the tool.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Parameters for a tools/call request.
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// The name of the tool to invoke.
    pub name: String,
    /// Optional arguments for the tool.
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Content item within a tool result.
#[derive(Debug, Serialize)]
pub struct ToolResultContent {
    /// The content type (e.g., "text").
    #[serde(rename = "type")]
    pub content_type: String,
    /// The text content of the result.
    pub text: String,
}

/// Result of a tool invocation.
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    /// The result content items.
    pub content: Vec<ToolResultContent>,
    /// Whether the result represents an error.
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// MCP Server running over stdio.
///
/// Handles JSON-RPC 2.0 messages over stdin/stdout. The server owns the
/// dashboard session for its whole lifetime.
pub struct McpServer {
    /// Application state.
    state: AppState,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Application state, including the session dashboard.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server using async stdio
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve line-delimited JSON-RPC from `input`, writing responses to `output`.
    pub async fn serve<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            session_id = %self.state.dashboard.session().id,
            "Cleaning Automation Hub server starting..."
        );

        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            // EOF reached
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line),
                Err(e) => {
                    error!(error = %e, bytes = bytes_read, "Request is not valid UTF-8");
                    Some(JsonRpcResponse::error(
                        None,
                        -32700,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            // Notifications get no response
            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                debug!(response = %response_json, "Sending response");

                output.write_all(response_json.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle one raw input line.
    ///
    /// Returns None for blank lines and notifications.
    pub fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        debug!(request = %trimmed, "Received request");

        match serde_json::from_str::<JsonRpcRequest>(trimmed) {
            Ok(request) => self.handle_request(request),
            Err(e) => {
                error!(error = %e, "Failed to parse request");
                Some(JsonRpcResponse::error(
                    None,
                    -32700,
                    format!("Parse error: {}", e),
                ))
            }
        }
    }

    /// Handle a single JSON-RPC request
    /// Returns None for notifications (requests without id) as JSON-RPC 2.0 requires
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Check if this is a notification (no id = no response required)
        let is_notification = request.id.is_none();

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request.id)),
            "initialized" => {
                debug!("Received initialized notification");
                None
            }
            "notifications/cancelled" => {
                debug!("Received cancelled notification");
                None
            }
            "tools/list" => Some(self.handle_tools_list(request.id)),
            "tools/call" => Some(self.handle_tool_call(request.id, request.params)),
            "ping" => Some(JsonRpcResponse::success(
                request.id,
                Value::Object(Default::default()),
            )),
            method => {
                // For unknown methods, only respond if it's a request (has id)
                if is_notification {
                    debug!(method = %method, "Unknown notification, ignoring");
                    None
                } else {
                    error!(method = %method, "Unknown method");
                    Some(JsonRpcResponse::error(
                        request.id,
                        -32601,
                        format!("Method not found: {}", method),
                    ))
                }
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Handling initialize request");

        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: Capabilities {
                tools: ToolCapabilities {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "cleaning-automation-hub".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                error!(error = %e, "Failed to serialize initialize result");
                JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e))
            }
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Handling tools/list request");

        JsonRpcResponse::success(
            id,
            serde_json::json!({
                "tools": tool_definitions()
            }),
        )
    }

    /// Handle tools/call request
    fn handle_tool_call(&mut self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, format!("Invalid params: {}", e));
                }
            },
            None => {
                return JsonRpcResponse::error(id, -32602, "Missing params");
            }
        };

        info!(tool = %params.name, "Handling tool call");

        let (content, is_error) =
            match handle_tool_call(&mut self.state.dashboard, &params.name, params.arguments) {
                Ok(result) => {
                    let text = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
                        error!(error = %e, "Failed to serialize tool result");
                        format!("{{\"error\": \"Serialization failed: {}\"}}", e)
                    });
                    (
                        ToolResultContent {
                            content_type: "text".to_string(),
                            text,
                        },
                        None,
                    )
                }
                Err(e) => (
                    ToolResultContent {
                        content_type: "text".to_string(),
                        text: format!("Error: {}", e),
                    },
                    Some(true),
                ),
            };

        let tool_result = ToolCallResult {
            content: vec![content],
            is_error,
        };

        match serde_json::to_value(tool_result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                error!(error = %e, "Failed to serialize tool call result");
                JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e))
            }
        }
    }
}

/// Every tool the server exposes, in listing order.
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        get_catalog_tool(),
        get_view_tool(),
        get_metrics_tool(),
        get_record_tool(),
        get_set_completed_tool(),
        get_set_favorite_tool(),
        get_set_priority_tool(),
        get_set_note_tool(),
        get_complete_all_tool(),
        get_reset_tool(),
        get_export_tool(),
        get_import_tool(),
        get_snapshot_tool(),
    ]
}

fn name_property() -> Value {
    serde_json::json!({
        "type": "string",
        "description": "Exact automation name as listed in the catalog"
    })
}

fn criteria_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "search": {
                "type": "string",
                "description": "Case-insensitive text matched against names and descriptions"
            },
            "categories": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Category names to include (all when omitted)"
            },
            "difficulty": {
                "type": "string",
                "enum": ["Easy", "Medium", "Hard"]
            },
            "roi": {
                "type": "string",
                "enum": ["High", "Medium", "Low"]
            },
            "priority": {
                "type": "string",
                "enum": ["High", "Medium", "Low"]
            },
            "status": {
                "type": "string",
                "enum": ["all", "completed", "pending", "favorites"],
                "default": "all"
            }
        },
        "additionalProperties": false
    })
}

/// Get the catalog listing tool definition
fn get_catalog_tool() -> Tool {
    Tool {
        name: "dashboard_catalog".to_string(),
        description: "List automation categories with record counts, or every record in one category.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Category to list records for"
                }
            },
            "additionalProperties": false
        }),
    }
}

/// Get the filtered view tool definition
fn get_view_tool() -> Tool {
    Tool {
        name: "dashboard_view".to_string(),
        description: "Search and filter the catalog. Returns the visible records grouped by category, each with its completion, favorite, priority and note, plus overall progress metrics.".to_string(),
        input_schema: criteria_schema(),
    }
}

/// Get the metrics tool definition
fn get_metrics_tool() -> Tool {
    Tool {
        name: "dashboard_metrics".to_string(),
        description: "Overall and per-category completion progress, favorite count and priority breakdown.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

/// Get the single record tool definition
fn get_record_tool() -> Tool {
    Tool {
        name: "dashboard_record".to_string(),
        description: "Show one automation with its session annotations.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": name_property()
            },
            "required": ["name"],
            "additionalProperties": false
        }),
    }
}

/// Get the completion toggle tool definition
fn get_set_completed_tool() -> Tool {
    Tool {
        name: "dashboard_set_completed".to_string(),
        description: "Mark an automation as implemented (or back to pending). The first completion time is kept even if the automation is later marked pending.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": name_property(),
                "completed": {
                    "type": "boolean",
                    "default": true
                }
            },
            "required": ["name"],
            "additionalProperties": false
        }),
    }
}

/// Get the favorite toggle tool definition
fn get_set_favorite_tool() -> Tool {
    Tool {
        name: "dashboard_set_favorite".to_string(),
        description: "Star or unstar an automation.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": name_property(),
                "favorite": {
                    "type": "boolean",
                    "default": true
                }
            },
            "required": ["name"],
            "additionalProperties": false
        }),
    }
}

/// Get the priority tool definition
fn get_set_priority_tool() -> Tool {
    Tool {
        name: "dashboard_set_priority".to_string(),
        description: "Set an automation's implementation priority.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": name_property(),
                "priority": {
                    "type": "string",
                    "enum": ["High", "Medium", "Low"]
                }
            },
            "required": ["name", "priority"],
            "additionalProperties": false
        }),
    }
}

/// Get the note tool definition
fn get_set_note_tool() -> Tool {
    Tool {
        name: "dashboard_set_note".to_string(),
        description: "Replace the free-text note on an automation. An empty note removes it.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": name_property(),
                "note": {
                    "type": "string"
                }
            },
            "required": ["name"],
            "additionalProperties": false
        }),
    }
}

/// Get the bulk completion tool definition
fn get_complete_all_tool() -> Tool {
    Tool {
        name: "dashboard_complete_all".to_string(),
        description: "Mark every automation matching the optional difficulty and category as implemented. With no filters, completes the whole catalog.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "difficulty": {
                    "type": "string",
                    "enum": ["Easy", "Medium", "Hard"]
                },
                "category": {
                    "type": "string"
                }
            },
            "additionalProperties": false
        }),
    }
}

/// Get the reset tool definition
fn get_reset_tool() -> Tool {
    Tool {
        name: "dashboard_reset".to_string(),
        description: "Clear session progress. Depending on server configuration, favorites and first completion times are cleared too or kept.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

/// Get the export tool definition
fn get_export_tool() -> Tool {
    Tool {
        name: "dashboard_export".to_string(),
        description: "Render a CSV progress report, optionally restricted to a filtered view and to chosen columns.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "criteria": criteria_schema(),
                "columns": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": [
                            "Category", "Automation", "Status", "Priority", "Difficulty",
                            "Time_Estimate", "Cost_Estimate", "ROI_Potential", "Tools",
                            "Notes", "Favorite", "Exported_At"
                        ]
                    }
                }
            },
            "additionalProperties": false
        }),
    }
}

/// Get the import tool definition
fn get_import_tool() -> Tool {
    Tool {
        name: "dashboard_import".to_string(),
        description: "Restore status, priority, notes and favorites from a previously exported CSV report. Rows for automations not in the catalog are skipped.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "CSV text including the header row"
                }
            },
            "required": ["content"],
            "additionalProperties": false
        }),
    }
}

/// Get the snapshot tool definition
fn get_snapshot_tool() -> Tool {
    Tool {
        name: "dashboard_snapshot".to_string(),
        description: "Return a point-in-time copy of all session progress, including annotated names missing from the catalog.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}
