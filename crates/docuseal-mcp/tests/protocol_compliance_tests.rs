//! MCP Protocol Compliance Integration Tests
//!
//! Tests that the MCP server correctly implements JSON-RPC 2.0 and
//! MCP protocol requirements, including ID preservation, error codes,
//! and end-to-end tool execution against a recording transport.

use std::sync::Arc;

use docuseal_mcp::DocusealMcpServer;
use docuseal_test_utils::{client_with_key, client_without_key, MockTransport, TEST_API_KEY};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn setup_server(transport: Arc<MockTransport>) -> DocusealMcpServer {
    let mut server = DocusealMcpServer::new(client_with_key(transport));
    server.initialize();
    server
}

async fn send(server: &DocusealMcpServer, request: &str) -> Value {
    serde_json::from_str(&server.handle_message(request).await.unwrap()).unwrap()
}

async fn call(server: &DocusealMcpServer, tool: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments }
    });
    send(server, &request.to_string()).await
}

// ==========================================================================
// JSON-RPC 2.0 ID Preservation
// ==========================================================================

#[tokio::test]
async fn test_numeric_id_preserved_in_response() {
    let server = setup_server(MockTransport::new());

    let response = send(&server, r#"{"jsonrpc":"2.0","id":42,"method":"initialize","params":{}}"#).await;

    assert_eq!(response["id"], 42, "Numeric ID must be echoed back exactly");
    assert_eq!(response["jsonrpc"], "2.0");
}

#[tokio::test]
async fn test_string_id_preserved_in_response() {
    let server = setup_server(MockTransport::new());

    let response = send(
        &server,
        r#"{"jsonrpc":"2.0","id":"req-abc-123","method":"tools/list","params":{}}"#,
    )
    .await;

    assert_eq!(response["id"], "req-abc-123");
}

#[tokio::test]
async fn test_id_preserved_in_error_response() {
    let server = setup_server(MockTransport::new());

    let response = send(
        &server,
        r#"{"jsonrpc":"2.0","id":"err-test","method":"nonexistent/method","params":{}}"#,
    )
    .await;

    assert_eq!(response["id"], "err-test");
    assert_eq!(response["error"]["code"], -32601);
    assert!(response.get("result").is_none());
}

// ==========================================================================
// Tool Calls End to End
// ==========================================================================

#[tokio::test]
async fn test_tool_failure_is_a_successful_rpc_response() {
    let transport = MockTransport::new();
    transport.respond_raw(422, r#"{"error":"invalid"}"#);
    let server = setup_server(transport.clone());

    let response = call(
        &server,
        "docuseal_create_submission",
        json!({"template_id": 1, "submitters": [{"email": "a@x.com", "role": "Signer"}]}),
    )
    .await;

    assert!(response.get("error").is_none(), "tool errors are data, not RPC errors");
    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error: "), "{text}");
    assert!(text.contains("422"));
    assert!(text.contains("invalid"));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_unknown_tool_names_the_tool_and_makes_no_call() {
    let transport = MockTransport::new();
    let server = setup_server(transport.clone());

    let response = call(&server, "docuseal_void_everything", json!({})).await;

    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("docuseal_void_everything"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_missing_key_makes_no_call() {
    let transport = MockTransport::new();
    let mut server = DocusealMcpServer::new(client_without_key(transport.clone()));
    server.initialize();

    let response = call(&server, "docuseal_get_submission", json!({"submission_id": 3})).await;

    assert_eq!(response["result"]["isError"], true);
    assert!(response["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("API key is required"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_create_submission_outbound_body() {
    let transport = MockTransport::new();
    transport.respond_json(200, json!([{"id": 10, "email": "a@x.com", "status": "pending"}]));
    let server = setup_server(transport.clone());

    let response = call(
        &server,
        "docuseal_create_submission",
        json!({
            "template_id": 1000,
            "submitters": [{"email": "a@x.com", "role": "Signer"}],
            "message": {"subject": "Please sign", "body": "Thanks"}
        }),
    )
    .await;

    assert!(response["result"].get("isError").is_none());

    let request = transport.single_request();
    assert_eq!(request.header("X-Auth-Token"), Some(TEST_API_KEY));
    assert_eq!(
        request.json_body().unwrap(),
        json!({
            "template_id": 1000,
            "submission": [{"submitters": [{"email": "a@x.com", "role": "Signer"}]}],
            "send_email": true,
            "order": "preserved",
            "message": {"subject": "Please sign", "body": "Thanks"}
        })
    );
}

#[tokio::test]
async fn test_create_template_from_pdf_forwards_documents() {
    let transport = MockTransport::new();
    let server = setup_server(transport.clone());
    let documents = json!([{
        "name": "contract.pdf",
        "file": "JVBERi0xLjQK",
        "fields": [{
            "name": "Buyer Signature",
            "role": "Buyer",
            "type": "signature",
            "areas": [{"x": 0.1, "y": 0.8, "w": 0.3, "h": 0.05, "page": 1}]
        }]
    }]);

    call(
        &server,
        "docuseal_create_template_from_pdf",
        json!({"name": "Contract", "documents": documents.clone(), "folder_name": "Sales"}),
    )
    .await;

    let body = transport.single_request().json_body().unwrap();
    assert_eq!(body["name"], "Contract");
    assert_eq!(body["folder_name"], "Sales");
    assert_eq!(body["documents"], documents);
    assert!(body.get("application_key").is_none());
}

#[tokio::test]
async fn test_sequential_calls_are_independent() {
    let transport = MockTransport::new();
    transport.respond_raw(500, "boom");
    transport.respond_json(200, json!({"id": 2}));
    let server = setup_server(transport.clone());

    let first = call(&server, "docuseal_get_template", json!({"template_id": 1})).await;
    let second = call(&server, "docuseal_get_template", json!({"template_id": 2})).await;

    assert_eq!(first["result"]["isError"], true);
    assert!(second["result"].get("isError").is_none());
    assert_eq!(transport.call_count(), 2);
}
