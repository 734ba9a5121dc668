/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Routes tool calls to the routine tools
/// 3. Writes JSON-RPC responses to stdout

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::storage::SqliteStorage;
use crate::tools::{self, ToolContext};
use crate::{MorningRoutineServer, ServerError};

/// MCP server wrapping a MorningRoutineServer
pub struct McpServer {
    routine: MorningRoutineServer,
    initialized: bool,
}

impl McpServer {
    pub fn new(routine: MorningRoutineServer) -> Self {
        Self {
            routine,
            initialized: false,
        }
    }

    /// Whether the client has sent its initialized notification
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_message(&line).await {
                        let response_str = serde_json::to_string(&response)?;
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process one line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications, which get no reply.
    pub async fn handle_message(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        let Some(id) = request.id.clone() else {
            self.handle_notification(&request.method);
            return None;
        };

        Some(self.handle_request(id, request))
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_request(&mut self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => return self.handle_tools_call(id, request.params),
            _ => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method '{}' not found", request.method),
                )
            }
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }

    fn handle_initialize(&self) -> Result<Value, serde_json::Error> {
        info!("MCP client connected");

        serde_json::to_value(InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Morning Routine MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    fn handle_tools_list(&self) -> Result<Value, serde_json::Error> {
        let tools = vec![
            definition::<tools::ListTasksParams>(
                "routine_tasks",
                "Show today's morning checklist with task IDs and progress",
            )?,
            definition::<tools::ToggleTaskParams>(
                "routine_toggle",
                "Check or uncheck one task of today's checklist",
            )?,
            definition::<tools::CompleteDayParams>(
                "routine_complete",
                "Complete this morning once every task is checked; extends the streak",
            )?,
            definition::<tools::MissDayParams>(
                "routine_miss",
                "Record a day as missed (defaults to yesterday); resets the streak",
            )?,
            definition::<tools::EditRoutineParams>(
                "routine_edit",
                "Replace the whole routine with a new ordered list of tasks",
            )?,
            definition::<tools::RenameTaskParams>("routine_rename", "Rename one task")?,
            definition::<tools::StatsParams>(
                "routine_stats",
                "Current streak, best streak and this month's completion rate",
            )?,
            definition::<tools::CalendarParams>(
                "routine_calendar",
                "Calendar of this month's completed and missed days (subscribers)",
            )?,
            definition::<tools::RecoverDayParams>(
                "routine_recover",
                "Turn a missed day into a completed one, once per month (subscribers)",
            )?,
            definition::<tools::SettingsParams>(
                "routine_settings",
                "Show or change the daily reminder time",
            )?,
        ];

        Ok(json!({ "tools": tools }))
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let call: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                )
            }
        };

        let result = self.call_tool(&call.name, call.arguments);
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }

    /// Run one tool by name
    pub fn call_tool(&self, name: &str, args: Map<String, Value>) -> ToolCallResult {
        let ctx = self.routine.context();
        let notifier = self.routine.notifier();

        let outcome = match name {
            "routine_tasks" => respond(&ctx, args, |ctx, p| tools::list_tasks(ctx, p)),
            "routine_toggle" => respond(&ctx, args, |ctx, p| tools::toggle_task(ctx, p)),
            "routine_complete" => {
                respond(&ctx, args, |ctx, p| tools::complete_day(ctx, notifier, p))
            }
            "routine_miss" => respond(&ctx, args, |ctx, p| tools::miss_day(ctx, p)),
            "routine_edit" => respond(&ctx, args, |ctx, p| tools::edit_routine(ctx, p)),
            "routine_rename" => respond(&ctx, args, |ctx, p| tools::rename_task(ctx, p)),
            "routine_stats" => respond(&ctx, args, |ctx, p| tools::get_stats(ctx, p)),
            "routine_calendar" => respond(&ctx, args, |ctx, p| tools::get_calendar(ctx, p)),
            "routine_recover" => respond(&ctx, args, |ctx, p| tools::recover_day(ctx, p)),
            "routine_settings" => respond(&ctx, args, |ctx, p| tools::update_settings(ctx, p)),
            _ => {
                return ToolCallResult::error(
                    error_codes::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", name),
                )
            }
        };

        outcome.unwrap_or_else(|e| {
            warn!("Tool '{}' failed: {}", name, e);
            ToolCallResult::error(error_code(&e), e.to_string())
        })
    }
}

fn definition<P: JsonSchema>(name: &str, description: &str) -> Result<ToolDefinition, serde_json::Error> {
    Ok(ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema_for!(P))?,
    })
}

/// Decode the arguments, run the tool and wrap its response
///
/// The response's `message` field becomes the text content.
fn respond<P, R, F>(
    ctx: &ToolContext<'_, SqliteStorage>,
    args: Map<String, Value>,
    tool: F,
) -> Result<ToolCallResult, ServerError>
where
    P: DeserializeOwned,
    R: Serialize,
    F: FnOnce(&ToolContext<'_, SqliteStorage>, P) -> Result<R, ServerError>,
{
    let params: P = serde_json::from_value(Value::Object(args))?;
    let response = tool(ctx, params)?;
    let structured = serde_json::to_value(&response)?;
    let text = structured
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(ToolCallResult::success(text, structured))
}
