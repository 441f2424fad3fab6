//! Error types for the registry client.

/// Registry errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Registry answered with a non-2xx status.
    #[error("Registry API error: {status} {status_text}. {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The registry could not be reached (DNS, connection, timeout).
    #[error("Registry request failed: {message}")]
    Transport { message: String },

    /// 2xx response whose body is not JSON.
    #[error("invalid response from registry: {message}")]
    InvalidResponse { message: String },
}

impl RegistryError {
    /// HTTP status code, if the registry responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Whether the request never reached the registry.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
