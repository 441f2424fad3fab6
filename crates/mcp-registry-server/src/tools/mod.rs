//! Tool contracts and the dispatcher that binds them to registry calls.
//!
//! A tool is declared once through [`Tool`]: name, schemas, typed arguments
//! and a handler. [`ToolRegistry`] erases the argument type, validates input
//! before any network call, validates output after projection, and turns
//! every failure into an error result instead of a protocol error.

use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use mcp_registry_client::{RegistryClient, RegistryError};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::jsonrpc::ToolResultBody;
use crate::schema::Contract;

mod get_server;
mod health_check;
mod list_server_versions;
mod list_servers;

pub use get_server::{GetServer, GetServerArgs};
pub use health_check::HealthCheck;
pub use list_server_versions::{ListServerVersions, ListServerVersionsArgs};
pub use list_servers::ListServers;

/// Per-call dependencies. Holds nothing mutable.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub client: RegistryClient,
}

impl ToolContext {
    pub fn new(client: RegistryClient) -> Self {
        Self { client }
    }

    /// Fetch a resource and decode it into its typed form.
    ///
    /// A body that does not decode is a broken upstream contract and is
    /// reported as [`ToolError::Transform`].
    pub async fn fetch_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ToolError> {
        let raw = self.client.fetch(path).await?;
        serde_json::from_value(raw).map_err(|e| ToolError::Transform(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("unexpected registry response: {0}")]
    Transform(String),
}

impl ToolError {
    /// Attach the operation that failed, e.g. "getting server a/b@1.0.0".
    pub fn during(self, operation: impl Into<String>) -> ToolFailure {
        ToolFailure {
            operation: operation.into(),
            error: self,
        }
    }
}

/// A failed invocation, rendered as `Error <operation>: <cause>`.
#[derive(Debug, thiserror::Error)]
#[error("Error {operation}: {error}")]
pub struct ToolFailure {
    pub operation: String,
    #[source]
    pub error: ToolError,
}

/// A typed tool declaration.
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    const NAME: &'static str;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;

    type Args: DeserializeOwned + Send + 'static;

    fn input_schema() -> Value;
    fn output_schema() -> Value;

    /// Phrase naming the operation and its identifiers, used in failure messages.
    fn operation(args: &Self::Args) -> String;

    async fn run(&self, ctx: &ToolContext, args: Self::Args) -> Result<Value, ToolError>;
}

/// Type-erased handler stored in the registry.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(
        &self,
        ctx: &ToolContext,
        args: Value,
        output: &Contract,
    ) -> Result<Value, ToolFailure>;
}

#[async_trait]
impl<T> ToolHandler for T
where
    T: Tool,
{
    async fn call(
        &self,
        ctx: &ToolContext,
        args: Value,
        output: &Contract,
    ) -> Result<Value, ToolFailure> {
        let args: T::Args = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArgs(e.to_string()).during(format!("calling {}", T::NAME)))?;

        let operation = T::operation(&args);
        let payload = self
            .run(ctx, args)
            .await
            .map_err(|e| e.during(operation.clone()))?;

        output
            .validate(&payload)
            .map_err(|msg| ToolError::Transform(msg).during(operation))?;

        Ok(payload)
    }
}

/// One registered tool.
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input: Contract,
    pub output: Contract,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    pub fn of<T: Tool>(tool: T) -> anyhow::Result<Self> {
        let input = Contract::compile(T::input_schema())
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("input schema of {}", T::NAME))?;
        let output = Contract::compile(T::output_schema())
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("output schema of {}", T::NAME))?;

        Ok(Self {
            name: T::NAME,
            title: T::TITLE,
            description: T::DESCRIPTION,
            input,
            output,
            handler: Arc::new(tool),
        })
    }

    /// Entry for a `tools/list` response.
    pub fn metadata(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": self.input.document(),
            "outputSchema": self.output.document(),
        })
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The dispatcher: tools in registration order plus their shared context.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    ctx: ToolContext,
}

impl ToolRegistry {
    pub fn empty(ctx: ToolContext) -> Self {
        Self {
            tools: Vec::new(),
            ctx,
        }
    }

    /// Registry with the four registry tools.
    pub fn with_default_tools(ctx: ToolContext) -> anyhow::Result<Self> {
        let mut registry = Self::empty(ctx);
        registry.register(ListServers)?;
        registry.register(ListServerVersions)?;
        registry.register(GetServer)?;
        registry.register(HealthCheck)?;
        Ok(registry)
    }

    pub fn register<T: Tool>(&mut self, tool: T) -> anyhow::Result<()> {
        if self.get(T::NAME).is_some() {
            anyhow::bail!("duplicate tool name '{}'", T::NAME);
        }
        self.tools.push(ToolDescriptor::of(tool)?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|d| d.name).collect()
    }

    /// `tools/list` entries in registration order.
    pub fn list(&self) -> Vec<Value> {
        self.tools.iter().map(ToolDescriptor::metadata).collect()
    }

    /// Invoke a tool. Returns `None` only when no tool has that name; every
    /// other failure is folded into an error result.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> Option<ToolResultBody> {
        let tool = self.get(name)?;
        let args = match arguments {
            Some(Value::Null) | None => json!({}),
            Some(v) => v,
        };

        debug!(tool = name, "tool call");

        let result = match tool.input.validate(&args) {
            Err(msg) => Err(ToolError::InvalidArgs(msg).during(format!("calling {}", name))),
            Ok(()) => tool.handler.call(&self.ctx, args, &tool.output).await,
        };

        Some(match result {
            Ok(payload) => ToolResultBody::success(payload),
            Err(failure) => {
                warn!(tool = name, error = %failure, "tool call failed");
                ToolResultBody::error(failure.to_string())
            }
        })
    }
}
