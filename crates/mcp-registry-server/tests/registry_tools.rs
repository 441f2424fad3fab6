//! End-to-end tool calls against a mocked registry.
//!
//! Uses wiremock for HTTP mocking. Tests cover the four tools, encoded paths,
//! query pass-through, HTTP/transport/decoding failures, and input rejection
//! without outbound traffic.

use mcp_registry_client::{RegistryClient, RegistryConfig};
use mcp_registry_server::jsonrpc::ToolResultBody;
use mcp_registry_server::{ToolContext, ToolRegistry};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry_for(uri: impl Into<String>) -> ToolRegistry {
    let client =
        RegistryClient::new(RegistryConfig::default().with_url(uri)).expect("failed to create client");
    ToolRegistry::with_default_tools(ToolContext::new(client)).expect("tools")
}

async fn call(mock_server: &MockServer, tool: &str, args: Value) -> ToolResultBody {
    registry_for(mock_server.uri())
        .call(tool, Some(args))
        .await
        .expect("tool is registered")
}

fn assert_success(result: &ToolResultBody) -> &Value {
    assert!(!result.is_error, "unexpected error: {}", result.text());
    let payload = result.structured_content.as_ref().expect("structured content");
    let rendered: Value = serde_json::from_str(result.text()).expect("text is JSON");
    assert_eq!(&rendered, payload, "text and structured content must agree");
    payload
}

fn server_entry(name: &str, version: &str, official: Value) -> Value {
    json!({
        "server": {"name": name, "description": format!("{} server", name), "version": version},
        "_meta": {"io.modelcontextprotocol.registry/official": official}
    })
}

#[tokio::test]
async fn test_health_check_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "timestamp": "2024-01-01T00:00:00Z"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = call(&mock_server, "health_check", json!({})).await;
    assert_eq!(
        assert_success(&result),
        &json!({"status": "ok", "timestamp": "2024-01-01T00:00:00Z"})
    );
}

#[tokio::test]
async fn test_health_check_without_arguments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&mock_server)
        .await;

    let result = registry_for(mock_server.uri())
        .call("health_check", None)
        .await
        .expect("tool is registered");
    assert_eq!(assert_success(&result), &json!({"status": "error"}));
}

#[tokio::test]
async fn test_list_servers_passes_query_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers"))
        .and(query_param("search", "File"))
        .and(query_param("limit", "2"))
        .and(query_param("version", "latest"))
        .and(query_param("cursor", "c1"))
        .and(query_param("updated_since", "2025-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [
                {
                    "server": {
                        "name": "io.example/files",
                        "description": "Files",
                        "version": "1.0.0",
                        "repository": {"url": "https://github.com/example/files", "source": "github", "id": "42"}
                    },
                    "_meta": {}
                }
            ],
            "metadata": {"nextCursor": "c2"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = call(
        &mock_server,
        "list_servers",
        json!({
            "cursor": "c1",
            "limit": 2,
            "search": "File",
            "updated_since": "2025-01-01T00:00:00Z",
            "version": "latest"
        }),
    )
    .await;

    assert_eq!(
        assert_success(&result),
        &json!({
            "servers": [{
                "name": "io.example/files",
                "description": "Files",
                "version": "1.0.0",
                "repository": {"url": "https://github.com/example/files", "source": "github"}
            }],
            "metadata": {"count": 0, "nextCursor": "c2"}
        })
    );
}

#[tokio::test]
async fn test_list_servers_without_arguments_sends_no_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = call(&mock_server, "list_servers", json!({})).await;
    assert_eq!(assert_success(&result), &json!({"servers": []}));

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn test_list_server_versions_encodes_name_and_keeps_flags() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers/io.example%2Ffoo/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [
                server_entry("io.example/foo", "1.0.0", json!({
                    "status": "active",
                    "publishedAt": "2025-01-01T00:00:00Z"
                })),
                server_entry("io.example/foo", "1.1.0", json!({
                    "status": "active",
                    "publishedAt": "2025-03-01T00:00:00Z",
                    "isLatest": true
                }))
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = call(
        &mock_server,
        "list_server_versions",
        json!({"serverName": "io.example/foo"}),
    )
    .await;

    assert_eq!(
        assert_success(&result),
        &json!({"servers": [
            {"name": "io.example/foo", "version": "1.0.0", "publishedAt": "2025-01-01T00:00:00Z"},
            {"name": "io.example/foo", "version": "1.1.0", "publishedAt": "2025-03-01T00:00:00Z", "isLatest": true}
        ]})
    );
}

#[tokio::test]
async fn test_get_server_latest_and_concrete_version() {
    let mock_server = MockServer::start().await;

    for version in ["latest", "1.2.3"] {
        Mock::given(method("GET"))
            .and(path(format!("/v0/servers/io.example%2Ffoo/versions/{}", version)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "server": {
                    "name": "io.example/foo",
                    "description": "Foo",
                    "version": "1.2.3",
                    "title": "Foo",
                    "repository": {"url": "https://github.com/example/foo", "source": "github", "subfolder": "foo"},
                    "packages": [{
                        "registryType": "npm",
                        "identifier": "@example/foo",
                        "version": "1.2.3",
                        "transport": {"type": "streamable-http", "url": "http://localhost:3000/mcp"},
                        "packageArguments": [{"type": "named", "name": "--port", "default": "3000"}]
                    }],
                    "remotes": [{"type": "sse", "url": "https://foo.example/sse"}]
                },
                "_meta": {
                    "io.modelcontextprotocol.registry/official": {
                        "status": "active",
                        "publishedAt": "2025-01-01T00:00:00Z",
                        "isLatest": true
                    },
                    "io.modelcontextprotocol.registry/publisher-provided": {"build": 7}
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    for version in ["latest", "1.2.3"] {
        let result = call(
            &mock_server,
            "get_server",
            json!({"serverName": "io.example/foo", "version": version}),
        )
        .await;

        assert_eq!(
            assert_success(&result),
            &json!({
                "name": "io.example/foo",
                "description": "Foo",
                "version": "1.2.3",
                "title": "Foo",
                "repository": {"url": "https://github.com/example/foo", "source": "github", "subfolder": "foo"},
                "packages": [{
                    "registryType": "npm",
                    "identifier": "@example/foo",
                    "version": "1.2.3",
                    "transport": {"type": "streamable-http", "url": "http://localhost:3000/mcp"},
                    "packageArguments": [{"type": "named", "name": "--port", "default": "3000"}]
                }],
                "metadata": {
                    "status": "active",
                    "publishedAt": "2025-01-01T00:00:00Z",
                    "isLatest": true
                }
            })
        );
    }
}

#[tokio::test]
async fn test_get_server_not_found_is_error_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers/io.example%2Fmissing/versions/9.9.9"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = call(
        &mock_server,
        "get_server",
        json!({"serverName": "io.example/missing", "version": "9.9.9"}),
    )
    .await;

    assert!(result.is_error);
    assert!(result.structured_content.is_none());
    assert_eq!(
        result.text(),
        r#"Error getting server io.example/missing@9.9.9: Registry API error: 404 Not Found. {"error":"not found"}"#
    );
}

#[tokio::test]
async fn test_list_versions_server_error_names_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers/io.example%2Ffoo/versions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let result = call(
        &mock_server,
        "list_server_versions",
        json!({"serverName": "io.example/foo"}),
    )
    .await;

    assert!(result.is_error);
    assert!(result.text().starts_with("Error listing versions for io.example/foo: "));
    assert!(result.text().contains("500"));
}

#[tokio::test]
async fn test_missing_required_field_is_transformation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers/io.example%2Ffoo/versions/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {"name": "io.example/foo", "description": "Foo"}
        })))
        .mount(&mock_server)
        .await;

    let result = call(
        &mock_server,
        "get_server",
        json!({"serverName": "io.example/foo", "version": "latest"}),
    )
    .await;

    assert!(result.is_error);
    assert!(result.structured_content.is_none());
    assert!(result
        .text()
        .starts_with("Error getting server io.example/foo@latest: unexpected registry response:"));
}

#[tokio::test]
async fn test_unreachable_registry_is_error_result() {
    let result = registry_for("http://127.0.0.1:1")
        .call("health_check", None)
        .await
        .expect("tool is registered");

    assert!(result.is_error);
    assert!(result.structured_content.is_none());
    let text = result.text();
    assert!(text.starts_with("Error checking registry health: Registry request failed:"));
    assert!(!text.contains("Registry API error"));
    let status_like = text
        .split_whitespace()
        .filter_map(|word| word.trim_matches(|c: char| !c.is_ascii_digit()).parse::<u16>().ok())
        .find(|n| (100..600).contains(n));
    assert_eq!(status_like, None, "transport failure must not carry a status: {}", text);
}

#[tokio::test]
async fn test_listing_tolerates_unknown_artifact_shapes() {
    let mock_server = MockServer::start().await;

    let mut odd = server_entry("io.example/odd", "0.1.0", json!({"isLatest": true}));
    odd["server"]["packages"] = json!([{
        "registryType": "npm",
        "identifier": "@example/odd",
        "transport": {"type": "websocket", "url": "ws://odd.example"}
    }]);
    odd["server"]["remotes"] = json!([{"type": "websocket", "url": "ws://odd.example"}]);

    Mock::given(method("GET"))
        .and(path("/v0/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [server_entry("io.example/good", "1.0.0", json!({})), odd],
            "metadata": {"count": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = call(&mock_server, "list_servers", json!({})).await;
    let payload = assert_success(&result);

    assert_eq!(payload["metadata"]["count"], 2);
    let names: Vec<&str> = payload["servers"]
        .as_array()
        .expect("servers")
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["io.example/good", "io.example/odd"]);
    assert!(payload["servers"][1].get("packages").is_none());
}

#[tokio::test]
async fn test_list_versions_treats_null_meta_as_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers/a%2Fb/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [
                {
                    "server": {"name": "a/b", "description": "b", "version": "1.0.0"},
                    "_meta": null
                },
                server_entry(
                    "a/b",
                    "2.0.0",
                    json!({"publishedAt": "2025-02-01T00:00:00Z", "isLatest": true})
                )
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = call(&mock_server, "list_server_versions", json!({"serverName": "a/b"})).await;

    assert_eq!(
        assert_success(&result),
        &json!({"servers": [
            {"name": "a/b", "version": "1.0.0"},
            {"name": "a/b", "version": "2.0.0", "publishedAt": "2025-02-01T00:00:00Z", "isLatest": true}
        ]})
    );
}

#[tokio::test]
async fn test_get_server_treats_null_meta_as_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/servers/a%2Fb/versions/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {"name": "a/b", "description": "b", "version": "1.0.0"},
            "_meta": null
        })))
        .mount(&mock_server)
        .await;

    let result = call(
        &mock_server,
        "get_server",
        json!({"serverName": "a/b", "version": "1.0.0"}),
    )
    .await;

    assert_eq!(
        assert_success(&result),
        &json!({"name": "a/b", "description": "b", "version": "1.0.0"})
    );
}

#[tokio::test]
async fn test_invalid_input_never_reaches_registry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cases = [
        ("list_servers", json!({"limit": 0})),
        ("list_servers", json!({"limit": "ten"})),
        ("list_servers", json!({"version": "1.0.0"})),
        ("list_servers", json!({"search": 5})),
        ("list_server_versions", json!({})),
        ("get_server", json!({"serverName": "io.example/foo"})),
        ("get_server", json!({"serverName": 1, "version": "latest"})),
    ];

    for (tool, args) in cases {
        let result = call(&mock_server, tool, args.clone()).await;
        assert!(result.is_error, "{tool} accepted {args}");
        assert!(result.structured_content.is_none());
        assert!(
            result
                .text()
                .starts_with(&format!("Error calling {}: invalid arguments:", tool)),
            "unexpected message: {}",
            result.text()
        );
    }

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mock_server = MockServer::start().await;

    for (name, delay_ms) in [("io.example/slow", 200u64), ("io.example/fast", 0)] {
        let encoded = name.replace('/', "%2F");
        Mock::given(method("GET"))
            .and(path(format!("/v0/servers/{}/versions/latest", encoded)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_millis(delay_ms))
                    .set_body_json(json!({
                        "server": {"name": name, "description": "d", "version": "1.0.0"}
                    })),
            )
            .mount(&mock_server)
            .await;
    }

    let registry = registry_for(mock_server.uri());
    let (slow, fast) = tokio::join!(
        registry.call(
            "get_server",
            Some(json!({"serverName": "io.example/slow", "version": "latest"}))
        ),
        registry.call(
            "get_server",
            Some(json!({"serverName": "io.example/fast", "version": "latest"}))
        ),
    );

    assert_eq!(assert_success(&slow.unwrap())["name"], "io.example/slow");
    assert_eq!(assert_success(&fast.unwrap())["name"], "io.example/fast");
}
