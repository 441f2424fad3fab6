//! Resource types for the registry `v0` API.
//!
//! Every optional field is skipped on serialization when absent, so a
//! resource re-emitted downstream never carries `null` placeholders.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Metadata key owned by the registry itself.
pub const OFFICIAL_META_KEY: &str = "io.modelcontextprotocol.registry/official";

/// Default public registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.modelcontextprotocol.io";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL for the registry.
    #[serde(default = "default_registry_url")]
    pub url: String,
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
        }
    }
}

impl RegistryConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `MCP_REGISTRY_URL` | Registry base URL |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("MCP_REGISTRY_URL").unwrap_or_else(|_| default_registry_url()),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Query parameters accepted by `GET /v0/servers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerListQuery {
    /// Opaque pagination cursor from a previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Name filter, passed through to the registry untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// RFC3339 timestamp, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionFilter>,
}

/// Version filter for server listings. The registry only understands `latest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionFilter {
    Latest,
}

impl VersionFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
        }
    }
}

/// A published server version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetail {
    /// Registry-unique name (e.g. "io.modelcontextprotocol/filesystem").
    pub name: String,

    pub description: String,

    /// Semver-like version string.
    pub version: String,

    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<Icon>>,

    /// Network endpoints for remotely hosted servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remotes: Option<Vec<Transport>>,
}

/// Source repository of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub url: String,

    /// Hosting kind (e.g. "github").
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Path of the server inside a monorepo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfolder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub src: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<IconTheme>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTheme {
    Light,
    Dark,
}

/// An installable artifact for a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package ecosystem (e.g. "npm", "pypi", "oci").
    pub registry_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_base_url: Option<String>,

    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,

    /// Runtime launcher hint (e.g. "npx", "uvx").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_hint: Option<String>,

    pub transport: Transport,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_arguments: Option<Vec<Argument>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_arguments: Option<Vec<Argument>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<Vec<KeyValueInput>>,
}

/// How a client talks to a server. Closed set, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Transport {
    #[serde(rename = "stdio")]
    Stdio,

    #[serde(rename = "streamable-http")]
    StreamableHttp {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<KeyValueInput>>,
    },

    #[serde(rename = "sse")]
    Sse {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<KeyValueInput>>,
    },
}

/// Fields shared by every user-supplied input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<InputFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// `{name}` substitutions inside `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, InputBase>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    String,
    Number,
    Boolean,
    Filepath,
}

/// Runtime or package argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Argument {
    Positional(PositionalArgument),
    Named(NamedArgument),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionalArgument {
    #[serde(flatten)]
    pub input: InputBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_hint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_repeated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedArgument {
    /// Flag name, e.g. "--port".
    pub name: String,

    #[serde(flatten)]
    pub input: InputBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_repeated: Option<bool>,
}

/// Named input: environment variable or HTTP header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueInput {
    pub name: String,

    #[serde(flatten)]
    pub input: InputBase,
}

/// The `_meta` envelope attached to each server entry.
///
/// Only the registry's own sub-object is typed; vendor keys are kept opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerMeta {
    #[serde(
        rename = "io.modelcontextprotocol.registry/official",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub official: Option<OfficialMeta>,

    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Registry-managed lifecycle metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServerStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_latest: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Active,
    Deprecated,
    Deleted,
}

/// Response from `GET /v0/servers/{name}/versions/{version}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub server: ServerDetail,

    #[serde(rename = "_meta", default, deserialize_with = "null_as_default")]
    pub meta: ServerMeta,
}

/// The identifying fields of a server, as needed for listings.
///
/// Packages, icons and remotes are not decoded, so an entry whose artifacts
/// use a shape this crate does not know still lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSummary {
    pub name: String,

    pub description: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

/// One entry of a listing, decoded as a [`ServerSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSummaryResponse {
    pub server: ServerSummary,

    #[serde(rename = "_meta", default, deserialize_with = "null_as_default")]
    pub meta: ServerMeta,
}

/// Response from `GET /v0/servers` and `GET /v0/servers/{name}/versions`.
///
/// Entries decode as [`ServerResponse`] unless a lighter entry type is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerList<S = ServerResponse> {
    pub servers: Vec<S>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ListMetadata>,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Response from `GET /v0/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
