//! MCP server that exposes the MCP server registry's read API as tools.
//!
//! Tools: `list_servers`, `list_server_versions`, `get_server`, `health_check`.
//! Each call validates its arguments against a JSON Schema, performs one GET
//! against the registry, projects the response into a stable shape, and
//! returns both pretty-printed text and structured content. Failures come
//! back as error results; they never end the process.

pub mod config;
pub mod jsonrpc;
pub mod logging;
pub mod projection;
pub mod schema;
pub mod server;
pub mod tools;

pub use config::{LogFormat, ServerConfig};
pub use server::{McpServer, ServerInfo};
pub use tools::{ToolContext, ToolError, ToolRegistry};
