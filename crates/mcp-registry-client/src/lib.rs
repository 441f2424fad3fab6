//! Read-only client for the MCP server registry.
//!
//! This crate provides:
//!
//! - HTTP client for the registry `v0` API (single GET per call, no retries)
//! - Resource path construction with per-segment percent-encoding
//! - Typed registry resources (servers, packages, transports, metadata)
//!
//! # Quick Start
//!
//! ```no_run
//! use mcp_registry_client::{paths, RegistryClient, RegistryConfig};
//!
//! # async fn example() -> Result<(), mcp_registry_client::RegistryError> {
//! let client = RegistryClient::new(RegistryConfig::default())?;
//! let raw = client.fetch(&paths::server_versions("io.modelcontextprotocol/filesystem")).await?;
//! println!("{}", raw);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `MCP_REGISTRY_URL` | Registry base URL (default: `https://registry.modelcontextprotocol.io`) |

pub mod client;
pub mod error;
pub mod paths;
pub mod types;

pub use client::RegistryClient;
pub use error::{RegistryError, RegistryResult};
pub use types::{
    Argument, HealthResponse, HealthStatus, Icon, IconTheme, InputBase, InputFormat,
    KeyValueInput, ListMetadata, NamedArgument, OfficialMeta, Package, PositionalArgument,
    RegistryConfig, Repository, ServerDetail, ServerList, ServerListQuery, ServerMeta,
    ServerResponse, ServerStatus, ServerSummary, ServerSummaryResponse, Transport,
    VersionFilter, DEFAULT_REGISTRY_URL, OFFICIAL_META_KEY,
};
