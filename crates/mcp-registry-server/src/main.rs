use clap::Parser;
use mcp_registry_client::RegistryClient;
use mcp_registry_server::{logging, McpServer, ServerConfig, ServerInfo, ToolContext, ToolRegistry};
use tracing::{error, info};

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let client = RegistryClient::new(config.registry_config())?;
    let tools = ToolRegistry::with_default_tools(ToolContext::new(client))?;
    let server = McpServer::new(tools, ServerInfo::default());

    info!(registry = %config.registry_url, "MCP Registry Server running on stdio");
    server.run_stdio().await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = ServerConfig::parse();
    if let Err(e) = logging::init(config.log_format) {
        eprintln!("fatal: {e:?}");
        std::process::exit(1);
    }

    let code = match run(config).await {
        Ok(()) => 0,
        Err(e) => {
            error!("fatal error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}
