use async_trait::async_trait;
use mcp_registry_client::{paths, ServerResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Tool, ToolContext, ToolError};
use crate::projection::project_server_detail;
use crate::schema::object;

/// Full detail of one server version.
pub struct GetServer;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetServerArgs {
    pub server_name: String,
    /// Concrete version or the literal `latest`.
    pub version: String,
}

#[async_trait]
impl Tool for GetServer {
    const NAME: &'static str = "get_server";
    const TITLE: &'static str = "Get Server Details";
    const DESCRIPTION: &'static str = "Get detailed information about a specific version of an MCP server. Use \"latest\" as version to get the latest version.";

    type Args = GetServerArgs;

    fn input_schema() -> Value {
        object(
            json!({
                "serverName": {
                    "type": "string",
                    "description": "Server name (e.g., \"io.modelcontextprotocol/filesystem\")"
                },
                "version": {
                    "type": "string",
                    "description": "Version string (e.g., \"1.0.0\") or \"latest\" for the latest version"
                }
            }),
            &["serverName", "version"],
        )
    }

    fn output_schema() -> Value {
        object(
            json!({
                "name": {"type": "string"},
                "description": {"type": "string"},
                "version": {"type": "string"},
                "title": {"type": "string"},
                "websiteUrl": {"type": "string"},
                "repository": object(
                    json!({
                        "url": {"type": "string"},
                        "source": {"type": "string"},
                        "id": {"type": "string"},
                        "subfolder": {"type": "string"}
                    }),
                    &["url", "source"],
                ),
                "packages": {"type": "array"},
                "icons": {"type": "array"},
                "metadata": object(
                    json!({
                        "status": {"type": "string"},
                        "publishedAt": {"type": "string"},
                        "updatedAt": {"type": "string"},
                        "isLatest": {"type": "boolean"}
                    }),
                    &[],
                )
            }),
            &["name", "description", "version"],
        )
    }

    fn operation(args: &GetServerArgs) -> String {
        format!("getting server {}@{}", args.server_name, args.version)
    }

    async fn run(&self, ctx: &ToolContext, args: GetServerArgs) -> Result<Value, ToolError> {
        let entry: ServerResponse = ctx
            .fetch_as(&paths::server_version(&args.server_name, &args.version))
            .await?;
        Ok(project_server_detail(&entry))
    }
}
