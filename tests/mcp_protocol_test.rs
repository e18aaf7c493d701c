//! Integration tests for MCP protocol handling
//!
//! Drives a full server over in-memory streams, one JSON-RPC message per line.

use cleaning_automation_hub::catalog::Catalog;
use cleaning_automation_hub::config::Config;
use cleaning_automation_hub::server::{AppState, McpServer};
use serde_json::{json, Value};

/// Verify JSON-RPC 2.0 response structure
fn assert_valid_jsonrpc_response(response: &Value) {
    assert_eq!(response["jsonrpc"], "2.0", "Invalid JSON-RPC version");
    assert!(
        response.get("result").is_some() || response.get("error").is_some(),
        "Response must have result or error"
    );
}

fn call(id: u64, tool: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments }
    })
}

/// Run a session of requests and return the parsed responses.
async fn run_session(requests: &[Value]) -> Vec<Value> {
    let mut server = McpServer::new(AppState::new(Config::default(), Catalog::builtin()));
    let input: String = requests
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();

    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).expect("Failed to parse JSON-RPC response"))
        .collect();
    for response in &responses {
        assert_valid_jsonrpc_response(response);
    }
    responses
}

fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

fn tool_json(response: &Value) -> Value {
    assert!(
        response["result"].get("isError").is_none(),
        "tool call failed: {}",
        tool_text(response)
    );
    serde_json::from_str(tool_text(response)).unwrap()
}

#[tokio::test]
async fn test_handshake_and_tool_listing() {
    let responses = run_session(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0.0"}
        }}),
        json!({"jsonrpc": "2.0", "method": "initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    ])
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "cleaning-automation-hub");

    let tools: Vec<&str> = responses[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    for expected in [
        "dashboard_catalog",
        "dashboard_view",
        "dashboard_metrics",
        "dashboard_record",
        "dashboard_set_completed",
        "dashboard_set_favorite",
        "dashboard_set_priority",
        "dashboard_set_note",
        "dashboard_complete_all",
        "dashboard_reset",
        "dashboard_export",
        "dashboard_import",
        "dashboard_snapshot",
    ] {
        assert!(tools.contains(&expected), "missing tool {}", expected);
    }
}

#[tokio::test]
async fn test_session_state_persists_across_calls() {
    let geo = "Geofence tracking for mobile crews";
    let responses = run_session(&[
        call(1, "dashboard_set_completed", json!({"name": geo})),
        call(2, "dashboard_set_priority", json!({"name": geo, "priority": "High"})),
        call(3, "dashboard_set_note", json!({"name": geo, "note": "pilot with crew B"})),
        call(4, "dashboard_set_favorite", json!({"name": geo})),
        call(5, "dashboard_record", json!({"name": geo})),
        call(6, "dashboard_view", json!({"status": "completed"})),
    ])
    .await;

    assert_eq!(responses.len(), 6);

    let record = tool_json(&responses[4]);
    assert_eq!(record["completed"], true);
    assert_eq!(record["favorite"], true);
    assert_eq!(record["priority"], "High");
    assert_eq!(record["note"], "pilot with crew B");
    assert!(record["first_completed_at"].is_string());

    let view = tool_json(&responses[5]);
    assert_eq!(view["visible_count"], 1);
    assert_eq!(view["metrics"]["completed"], 1);
    assert_eq!(view["metrics"]["priorities"]["high"], 1);
}

#[tokio::test]
async fn test_errors_do_not_end_the_session() {
    let responses = run_session(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "unknown/method"}),
        call(2, "dashboard_set_completed", json!({"name": "Not a real automation"})),
        call(3, "dashboard_teleport", json!({})),
        call(4, "dashboard_set_priority", json!({"name": "x", "priority": "Urgent"})),
        call(5, "dashboard_metrics", json!({})),
    ])
    .await;

    assert_eq!(responses.len(), 5);
    assert_eq!(responses[0]["error"]["code"], -32601);
    assert_eq!(responses[1]["result"]["isError"], true);
    assert!(tool_text(&responses[1]).contains("Unknown automation"));
    assert_eq!(responses[2]["result"]["isError"], true);
    assert!(tool_text(&responses[2]).contains("Unknown tool"));
    assert_eq!(responses[3]["result"]["isError"], true);
    assert_eq!(tool_json(&responses[4])["completed"], 0);
}

#[tokio::test]
async fn test_parse_error_keeps_serving() {
    let mut server = McpServer::new(AppState::new(Config::default(), Catalog::builtin()));
    let input = "not json\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n";

    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 9);
}

#[tokio::test]
async fn test_export_import_through_tools() {
    let geo = "Auto clock-in/out system via geolocation";
    let responses = run_session(&[
        call(1, "dashboard_set_completed", json!({"name": geo})),
        call(2, "dashboard_set_note", json!({"name": geo, "note": "needs GPS, phones"})),
        call(3, "dashboard_export", json!({"columns": ["Automation", "Status", "Notes"]})),
        call(4, "dashboard_reset", json!({})),
    ])
    .await;

    let report = tool_json(&responses[2]);
    let content = report["content"].as_str().unwrap().to_string();
    assert!(content.contains(&format!("{},Completed,\"needs GPS, phones\"", geo)));
    assert_eq!(tool_json(&responses[3])["metrics"]["completed"], 0);

    let responses = run_session(&[
        call(1, "dashboard_import", json!({"content": content})),
        call(2, "dashboard_snapshot", json!({})),
    ])
    .await;

    let imported = tool_json(&responses[0]);
    assert_eq!(imported["applied"], 100);
    let snapshot = tool_json(&responses[1]);
    assert_eq!(snapshot["completed"], json!([geo]));
    assert_eq!(snapshot["notes"][geo], "needs GPS, phones");
}

#[tokio::test]
async fn test_complete_all_by_category() {
    let responses = run_session(&[
        call(1, "dashboard_catalog", json!({})),
    ])
    .await;
    let catalog = tool_json(&responses[0]);
    let category = catalog["categories"][0]["name"].as_str().unwrap().to_string();
    let count = catalog["categories"][0]["item_count"].as_u64().unwrap();

    let responses = run_session(&[
        call(1, "dashboard_complete_all", json!({"category": category})),
        call(2, "dashboard_complete_all", json!({"category": "No such category"})),
    ])
    .await;
    let outcome = tool_json(&responses[0]);
    assert_eq!(outcome["newly_completed"].as_u64().unwrap(), count);
    assert_eq!(outcome["metrics"]["categories"][0]["percentage"], 100.0);
    assert_eq!(responses[1]["result"]["isError"], true);
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_session_alive() {
    let geo = "Geofence tracking for mobile crews";
    let mut server = McpServer::new(AppState::new(Config::default(), Catalog::builtin()));

    let mut input = format!("{}\n", call(1, "dashboard_set_completed", json!({"name": geo})))
        .into_bytes();
    input.extend_from_slice(b"\xff\xfe garbage\n");
    input.extend_from_slice(format!("{}\n", json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).as_bytes());
    input.extend_from_slice(format!("{}\n", call(3, "dashboard_metrics", json!({}))).as_bytes());

    let mut output = Vec::new();
    server.serve(input.as_slice(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[1]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], Value::Null);
    assert_eq!(responses[2]["id"], 2);
    assert!(responses[2].get("result").is_some());
    assert_eq!(tool_json(&responses[3])["completed"], 1);
}
