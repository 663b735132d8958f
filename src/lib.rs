pub mod aggregator;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod reporter;
pub mod retry;
pub mod scan;

pub use aggregator::{CancelFlag, ScanCollector, VulnSummary};
pub use api::{ApiError, HttpRegistryApi, ImageQuery, RegistryApi};
pub use cli::{Cli, OutputFormat};
pub use error::{AuditError, Result};
pub use reporter::{
    FetchProgress, OutputFormatter, Reporter, json::JsonReporter, terminal::TerminalReporter,
};
pub use scan::{
    ALLOWED_SEVERITIES, ImageRef, Scan, ScanResult, TokenBroker, VulnFilter, Vulnerability,
    filter_scan,
};
