//! Registry client.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::types::RegistryConfig;

mod http;

use http::HttpBackend;

const USER_AGENT_VALUE: &str = concat!("mcp-registry-client/", env!("CARGO_PKG_VERSION"));

/// Read-only client for the registry `v0` API.
///
/// Holds no per-request state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: HttpBackend,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| RegistryError::Transport {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = config.url.trim_end_matches('/').to_string();

        Ok(Self {
            http: HttpBackend { client, base_url },
        })
    }

    /// GET a registry-relative path (already encoded, see [`crate::paths`])
    /// and return the body as untyped JSON.
    pub async fn fetch(&self, path: &str) -> RegistryResult<Value> {
        let url = format!("{}{}", self.http.base_url, path);
        debug!(url = %url, "fetching registry resource");

        let body = self.http.get(&url).await?;

        serde_json::from_str(&body).map_err(|e| RegistryError::InvalidResponse {
            message: format!("failed to parse response from {}: {}", path, e),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }
}
