//! Platform API access.
//!
//! `RegistryApi` is the seam between the aggregation pipeline and the
//! platform: resolving which images are deployed, exchanging scan-access
//! tokens, and fetching per-image vulnerability scans. `HttpRegistryApi` is
//! the production implementation; tests substitute in-memory fakes.

pub mod client;
pub mod error;
pub mod types;

pub use client::HttpRegistryApi;
pub use error::ApiError;
pub use types::{AppSummary, ImageQuery, MachineSummary, OrgSummary, TokenResponse};

use crate::scan::types::{ImageRef, Scan};

pub trait RegistryApi {
    /// Resolve the ordered list of images in scope, sorted by
    /// `(org, app, machine)`.
    fn list_images(&self, query: &ImageQuery) -> Result<Vec<ImageRef>, ApiError>;

    /// Exchange an org/app pair for a scan-access token.
    fn scan_token(&self, org_id: &str, app_id: &str) -> Result<String, ApiError>;

    /// Fetch the raw vulnerability scan for one image path.
    fn fetch_scan(&self, path: &str, token: &str) -> Result<Scan, ApiError>;
}
