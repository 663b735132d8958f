use thiserror::Error;

/// Transport-level errors from the platform API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the response body could not be read.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Credentials were rejected (401/403).
    #[error("authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The requested entity does not exist.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// The image path's registry or format cannot be scanned. Recoverable
    /// per-image; the caller records a skip and continues.
    #[error("unsupported repository: {0}")]
    UnsupportedRepository(String),

    /// Upstream gateway timeout. The only retryable signature.
    #[error("gateway timeout for {url}")]
    GatewayTimeout { url: String },

    /// Any other non-2xx response.
    #[error("unexpected status {status} from {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    /// The image query named neither an app nor an org.
    #[error("invalid image query: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// Whether the error matches the narrow transient signature worth
    /// retrying. Everything else is permanent.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::GatewayTimeout { .. })
    }

    pub fn is_unsupported_repository(&self) -> bool {
        matches!(self, ApiError::UnsupportedRepository(_))
    }
}
