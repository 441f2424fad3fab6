use async_trait::async_trait;
use mcp_registry_client::{paths, HealthResponse};
use serde_json::{json, Value};

use super::{Tool, ToolContext, ToolError};
use crate::projection::project_health;
use crate::schema::object;

/// Registry liveness probe.
pub struct HealthCheck;

#[async_trait]
impl Tool for HealthCheck {
    const NAME: &'static str = "health_check";
    const TITLE: &'static str = "Health Check";
    const DESCRIPTION: &'static str = "Check the health status of the MCP registry";

    // No inputs; extra keys are ignored.
    type Args = serde::de::IgnoredAny;

    fn input_schema() -> Value {
        object(json!({}), &[])
    }

    fn output_schema() -> Value {
        object(
            json!({
                "status": {"type": "string"},
                "timestamp": {"type": "string"}
            }),
            &["status"],
        )
    }

    fn operation(_args: &serde::de::IgnoredAny) -> String {
        "checking registry health".to_string()
    }

    async fn run(&self, ctx: &ToolContext, _args: serde::de::IgnoredAny) -> Result<Value, ToolError> {
        let health: HealthResponse = ctx.fetch_as(&paths::health()).await?;
        Ok(project_health(&health))
    }
}
