//! HTTP layer: status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes. One request per call, no retries.

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};

/// HTTP backend for making requests (holds reqwest client and base URL).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
}

impl HttpBackend {
    /// Single GET returning the body text of a 2xx response.
    ///
    /// Any non-2xx becomes [`RegistryError::Http`] carrying the body. A body
    /// that cannot be read is a [`RegistryError::Transport`] on either branch.
    pub(crate) async fn get(&self, url: &str) -> RegistryResult<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| RegistryError::Transport {
                message: format!("failed to read response body: {}", e),
            })?;

        if status.is_success() {
            return Ok(body);
        }

        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        debug!(status = status.as_u16(), url = %url, "registry returned error status");

        Err(RegistryError::Http {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
