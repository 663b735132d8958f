//! Error types for reg-audit.

use crate::api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("severity ({0}) must be one of critical, high, medium, low, negligible, unknown")]
    InvalidSeverity(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {path}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Listing images: {0}")]
    ListImages(#[source] ApiError),

    #[error("Making scan token for app {app_id} in org {org_id}: {source}")]
    TokenExchange {
        org_id: String,
        app_id: String,
        #[source]
        source: ApiError,
    },

    #[error("Getting vulnerability scan for {app} ({machine}): {source}")]
    Scan {
        app: String,
        machine: String,
        #[source]
        source: ApiError,
    },

    #[error("Scan aggregation cancelled")]
    Cancelled,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type alias for reg-audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
