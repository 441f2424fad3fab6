use async_trait::async_trait;
use mcp_registry_client::{paths, ServerList, ServerListQuery, ServerSummaryResponse};
use serde_json::{json, Value};

use super::{Tool, ToolContext, ToolError};
use crate::projection::project_server_list;
use crate::schema::object;

/// Paginated, filterable server listing.
pub struct ListServers;

#[async_trait]
impl Tool for ListServers {
    const NAME: &'static str = "list_servers";
    const TITLE: &'static str = "List MCP Servers";
    const DESCRIPTION: &'static str =
        "List all registered MCP servers from the registry with optional filtering and pagination";

    type Args = ServerListQuery;

    fn input_schema() -> Value {
        object(
            json!({
                "cursor": {
                    "type": "string",
                    "description": "Pagination cursor from previous response"
                },
                "limit": {
                    "type": "integer",
                    "exclusiveMinimum": 0,
                    "description": "Maximum number of servers to return"
                },
                "search": {
                    "type": "string",
                    "description": "Case-insensitive substring search on server names"
                },
                "updated_since": {
                    "type": "string",
                    "description": "Filter servers updated after this RFC3339 timestamp"
                },
                "version": {
                    "type": "string",
                    "enum": ["latest"],
                    "description": "Filter by version (currently only \"latest\" is supported)"
                }
            }),
            &[],
        )
    }

    fn output_schema() -> Value {
        object(
            json!({
                "servers": {
                    "type": "array",
                    "items": object(
                        json!({
                            "name": {"type": "string"},
                            "description": {"type": "string"},
                            "version": {"type": "string"},
                            "title": {"type": "string"},
                            "websiteUrl": {"type": "string"},
                            "repository": object(
                                json!({
                                    "url": {"type": "string"},
                                    "source": {"type": "string"}
                                }),
                                &["url", "source"],
                            )
                        }),
                        &["name", "description", "version"],
                    )
                },
                "metadata": object(
                    json!({
                        "count": {"type": "number"},
                        "nextCursor": {"type": "string"}
                    }),
                    &["count"],
                )
            }),
            &["servers"],
        )
    }

    fn operation(_args: &ServerListQuery) -> String {
        "listing servers".to_string()
    }

    async fn run(&self, ctx: &ToolContext, args: ServerListQuery) -> Result<Value, ToolError> {
        let list: ServerList<ServerSummaryResponse> = ctx.fetch_as(&paths::servers(&args)).await?;
        Ok(project_server_list(&list))
    }
}
