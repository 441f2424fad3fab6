use async_trait::async_trait;
use mcp_registry_client::{paths, ServerList, ServerSummaryResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Tool, ToolContext, ToolError};
use crate::projection::project_version_list;
use crate::schema::object;

/// Every published version of one server.
pub struct ListServerVersions;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListServerVersionsArgs {
    /// Raw server name; encoded when the path is built.
    pub server_name: String,
}

#[async_trait]
impl Tool for ListServerVersions {
    const NAME: &'static str = "list_server_versions";
    const TITLE: &'static str = "List Server Versions";
    const DESCRIPTION: &'static str = "List all available versions for a specific MCP server";

    type Args = ListServerVersionsArgs;

    fn input_schema() -> Value {
        object(
            json!({
                "serverName": {
                    "type": "string",
                    "description": "Server name (e.g., \"io.modelcontextprotocol/filesystem\")"
                }
            }),
            &["serverName"],
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
                            "version": {"type": "string"},
                            "publishedAt": {"type": "string"},
                            "isLatest": {"type": "boolean"}
                        }),
                        &["name", "version"],
                    )
                }
            }),
            &["servers"],
        )
    }

    fn operation(args: &ListServerVersionsArgs) -> String {
        format!("listing versions for {}", args.server_name)
    }

    async fn run(
        &self,
        ctx: &ToolContext,
        args: ListServerVersionsArgs,
    ) -> Result<Value, ToolError> {
        let list: ServerList<ServerSummaryResponse> = ctx
            .fetch_as(&paths::server_versions(&args.server_name))
            .await?;
        Ok(project_version_list(&list))
    }
}
