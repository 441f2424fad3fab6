//! Protocol round trip over an in-memory duplex pipe: initialize, tools/list,
//! tools/call, in the same framing the binary uses on stdio.

use std::sync::Arc;

use mcp_registry_client::{RegistryClient, RegistryConfig};
use mcp_registry_server::{McpServer, ServerInfo, ToolContext, ToolRegistry};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_for(uri: String) -> Arc<McpServer> {
    let client = RegistryClient::new(RegistryConfig::default().with_url(uri)).expect("client");
    let tools = ToolRegistry::with_default_tools(ToolContext::new(client)).expect("tools");
    Arc::new(McpServer::new(
        tools,
        ServerInfo {
            name: "test-server".to_string(),
            version: "0.0.1".to_string(),
        },
    ))
}

#[tokio::test]
async fn test_stdio_roundtrip() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "timestamp": "2024-01-01T00:00:00Z"})),
        )
        .mount(&mock_server)
        .await;

    let (client_in, server_in) = tokio::io::duplex(64 * 1024);
    let (server_out, client_out) = tokio::io::duplex(64 * 1024);

    let server = server_for(mock_server.uri());
    let serve = tokio::spawn(server.serve(server_in, server_out));

    let mut writer = client_in;
    let mut reader = BufReader::new(client_out).lines();

    let requests = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "1.0"}
        }}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {
            "name": "health_check", "arguments": {}
        }}),
    ];

    // Send one at a time so responses arrive in request order.
    let mut responses: Vec<Value> = Vec::new();
    for req in &requests {
        writer
            .write_all(format!("{}\n", req).as_bytes())
            .await
            .unwrap();
        writer.flush().await.unwrap();
        if req.get("id").is_some() {
            let line = reader.next_line().await.unwrap().expect("response line");
            responses.push(serde_json::from_str(&line).expect("response is JSON"));
        }
    }

    assert_eq!(responses.len(), 3, "notification must not be answered");

    let init = &responses[0];
    assert_eq!(init["id"], 1);
    assert_eq!(init["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(init["result"]["serverInfo"]["name"], "test-server");

    let tools = responses[1]["result"]["tools"].as_array().expect("tools array");
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["list_servers", "list_server_versions", "get_server", "health_check"]
    );
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert_eq!(tool["outputSchema"]["type"], "object");
        assert!(tool["title"].is_string());
        assert!(tool["description"].is_string());
    }
    let get_server = &tools[2];
    assert_eq!(
        get_server["inputSchema"]["required"],
        json!(["serverName", "version"])
    );

    let call = &responses[2];
    assert_eq!(call["id"], 3);
    assert_eq!(
        call["result"]["structuredContent"],
        json!({"status": "ok", "timestamp": "2024-01-01T00:00:00Z"})
    );
    assert_eq!(call["result"]["content"][0]["type"], "text");
    assert!(call["result"].get("isError").is_none());

    drop(writer);
    serve.await.unwrap().expect("serve exits cleanly on EOF");
}

#[tokio::test]
async fn test_failed_call_keeps_serving() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/health"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let (client_in, server_in) = tokio::io::duplex(64 * 1024);
    let (server_out, client_out) = tokio::io::duplex(64 * 1024);
    let serve = tokio::spawn(server_for(mock_server.uri()).serve(server_in, server_out));

    let mut writer = client_in;
    let mut reader = BufReader::new(client_out).lines();

    let call = json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {"name": "health_check"}});
    writer
        .write_all(format!("{}\n", call).as_bytes())
        .await
        .unwrap();
    let line = reader.next_line().await.unwrap().expect("response line");
    let resp: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(resp["result"]["isError"], true);
    assert!(resp["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Error checking registry health: Registry API error: 502"));
    assert!(resp["result"].get("structuredContent").is_none());

    writer
        .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":8,\"method\":\"ping\"}\n")
        .await
        .unwrap();
    let line = reader.next_line().await.unwrap().expect("response line");
    let resp: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(resp, json!({"jsonrpc": "2.0", "id": 8, "result": {}}));

    drop(writer);
    serve.await.unwrap().expect("serve exits cleanly on EOF");
}
