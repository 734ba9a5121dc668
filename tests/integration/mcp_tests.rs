/// JSON-RPC handling of the MCP server without stdin/stdout
use chrono::NaiveDate;
use morning_routine_mcp::mcp::protocol::error_codes;
use morning_routine_mcp::mcp::McpServer;
use morning_routine_mcp::*;
use serde_json::{json, Value};

fn server_on(day: &str) -> McpServer {
    let storage = SqliteStorage::open_in_memory().expect("in-memory storage");
    let today = NaiveDate::parse_from_str(day, "%Y-%m-%d").expect("valid test date");
    let routine = MorningRoutineServer::with_storage(storage, "default").with_clock(FixedClock::new(today));
    McpServer::new(routine)
}

async fn request(server: &mut McpServer, id: u64, method: &str, params: Value) -> Value {
    let line = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}).to_string();
    let response = server.handle_message(&line).await.expect("a response");
    serde_json::to_value(&response).expect("serializable response")
}

async fn call(server: &mut McpServer, name: &str, arguments: Value) -> Value {
    let response = request(server, 7, "tools/call", json!({"name": name, "arguments": arguments})).await;
    response["result"].clone()
}

#[cfg(test)]
mod mcp_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let mut server = server_on("2024-01-15");

        let init = request(&mut server, 1, "initialize", json!({})).await;
        assert_eq!(init["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(init["result"]["serverInfo"]["name"], "Morning Routine MCP");

        let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        assert!(server.handle_message(&notification).await.is_none());
        assert!(server.is_initialized());

        let listed = request(&mut server, 2, "tools/list", json!({})).await;
        let names: Vec<&str> = listed["result"]["tools"]
            .as_array()
            .expect("tool array")
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"routine_toggle"));
        assert!(names.contains(&"routine_recover"));

        let toggle = listed["result"]["tools"]
            .as_array()
            .and_then(|tools| tools.iter().find(|t| t["name"] == "routine_toggle"))
            .expect("toggle tool");
        assert!(toggle["inputSchema"]["properties"]["task_id"].is_object());
    }

    #[tokio::test]
    async fn test_full_morning_through_tools() {
        let mut server = server_on("2024-01-15");

        let listed = call(&mut server, "routine_tasks", json!({})).await;
        assert_eq!(listed["isError"], false);
        let ids: Vec<String> = listed["structuredContent"]["tasks"]
            .as_array()
            .expect("tasks")
            .iter()
            .filter_map(|t| t["task_id"].as_str().map(str::to_string))
            .collect();
        assert_eq!(ids.len(), 5);

        let early = call(&mut server, "routine_complete", json!({})).await;
        assert_eq!(early["isError"], true);
        assert_eq!(early["structuredContent"]["code"], error_codes::VALIDATION_ERROR);

        for id in &ids {
            let toggled = call(&mut server, "routine_toggle", json!({"task_id": id})).await;
            assert_eq!(toggled["isError"], false);
        }

        let done = call(&mut server, "routine_complete", json!({})).await;
        assert_eq!(done["isError"], false);
        assert_eq!(done["structuredContent"]["current_streak"], 1);
        assert!(done["content"][0]["text"].as_str().unwrap_or_default().contains("Morning won"));

        let stats = call(&mut server, "routine_stats", json!({})).await;
        assert_eq!(stats["structuredContent"]["stats"]["monthly_percentage"], 100);
    }

    #[tokio::test]
    async fn test_tool_errors_carry_codes() {
        let mut server = server_on("2024-01-15");

        let calendar = call(&mut server, "routine_calendar", json!({"entitled": false})).await;
        assert_eq!(calendar["isError"], true);
        assert_eq!(calendar["structuredContent"]["code"], error_codes::PRECONDITION_DENIED);

        let recover = call(&mut server, "routine_recover", json!({"date": "2024-01-10", "entitled": true})).await;
        assert_eq!(recover["structuredContent"]["code"], error_codes::NOT_FOUND);

        let missing_arg = call(&mut server, "routine_toggle", json!({})).await;
        assert_eq!(missing_arg["structuredContent"]["code"], error_codes::INVALID_PARAMS);

        let unknown = call(&mut server, "routine_dance", json!({})).await;
        assert_eq!(unknown["isError"], true);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let mut server = server_on("2024-01-15");

        let bad_json = server.handle_message("{not json").await.expect("a response");
        let bad_json = serde_json::to_value(&bad_json).expect("serializable");
        assert_eq!(bad_json["error"]["code"], error_codes::PARSE_ERROR);

        let unknown = request(&mut server, 3, "resources/list", json!({})).await;
        assert_eq!(unknown["error"]["code"], error_codes::METHOD_NOT_FOUND);

        assert!(server.handle_message("   ").await.is_none());

        // A null id is still a request and gets an answer
        let null_id = server
            .handle_message(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .expect("a response to a null id");
        let null_id = serde_json::to_value(&null_id).expect("serializable");
        assert_eq!(null_id["id"], Value::Null);
        assert!(null_id["result"].is_object());
    }
}
