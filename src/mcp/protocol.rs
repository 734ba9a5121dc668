/// MCP (Model Context Protocol) message structures
///
/// JSON-RPC 2.0 envelopes plus the MCP payloads the routine server sends
/// and receives.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::ErrorKind;
use crate::ServerError;

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request message
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// `None` only when the field is absent (a notification); an explicit
    /// `null` id is `Some(Value::Null)` and still gets a reply
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Runs only when the field is present, so `null` becomes `Some(Null)`
fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response message
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Parameters of a tools/call request
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Tool name (e.g., "routine_toggle")
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// Result of a tools/call request
///
/// The text content is what a chat client shows; `structured_content`
/// carries the full response (or the error code) for programmatic callers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

/// Content returned by a tool
#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Tool advertised in tools/list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

/// Response to the initialize request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// JSON-RPC error codes
pub mod error_codes {
    /// Invalid JSON was received
    pub const PARSE_ERROR: i32 = -32700;
    /// The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Method exists but parameters are wrong
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application codes, kept in the -32000 to -32099 range
    /// Input failed validation (bad title, future date, conflicting outcome)
    pub const VALIDATION_ERROR: i32 = -32001;
    /// Task or day doesn't exist
    pub const NOT_FOUND: i32 = -32002;
    /// Operation not allowed right now (no subscription, quota used)
    pub const PRECONDITION_DENIED: i32 = -32003;
    /// Database or storage operation failed
    pub const STORAGE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }
}

impl ToolCallResult {
    /// Successful result with text content and the full response
    pub fn success(text: String, structured: Value) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
            structured_content: Some(structured),
        }
    }

    /// Error result carrying the error code for the failure
    pub fn error(code: i32, message: String) -> Self {
        Self {
            content: vec![ToolContent::text(format!("Error: {}", message))],
            is_error: true,
            structured_content: Some(serde_json::json!({ "code": code })),
        }
    }
}

impl ToolContent {
    fn text(text: String) -> Self {
        Self {
            content_type: "text".to_string(),
            text,
        }
    }
}

/// Map a server error to its JSON-RPC error code
pub fn error_code(error: &ServerError) -> i32 {
    match error {
        ServerError::Domain(e) => match e.kind() {
            ErrorKind::Validation => error_codes::VALIDATION_ERROR,
            ErrorKind::NotFound => error_codes::NOT_FOUND,
            ErrorKind::PreconditionDenied => error_codes::PRECONDITION_DENIED,
        },
        ServerError::Database(_) => error_codes::STORAGE_ERROR,
        ServerError::Json(_) => error_codes::INVALID_PARAMS,
        ServerError::Io(_) => error_codes::INTERNAL_ERROR,
    }
}
