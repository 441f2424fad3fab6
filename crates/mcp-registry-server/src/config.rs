use clap::{Parser, ValueEnum};
use mcp_registry_client::{RegistryConfig, DEFAULT_REGISTRY_URL};

/// Command-line and environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mcp-registry-server",
    version,
    about = "MCP server exposing the MCP server registry as tools (stdio)"
)]
pub struct ServerConfig {
    /// Registry base URL.
    #[arg(long, env = "MCP_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Diagnostic log format (always written to stderr).
    #[arg(long, env = "MCP_REGISTRY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig::default().with_url(self.registry_url.clone())
    }
}
