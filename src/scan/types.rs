use serde::{Deserialize, Serialize};

/// Severities a scan may report, ordered most severe first. The `--severity`
/// filter is validated against this list, case-sensitively.
pub const ALLOWED_SEVERITIES: &[&str] =
    &["critical", "high", "medium", "low", "negligible", "unknown"];

/// One container image as used by one machine. Multiple machines may
/// reference the same `path`, and several apps may share a path too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub org_id: String,
    pub org: String,
    pub app_id: String,
    pub app: String,
    pub machine: String,
    pub path: String,
}

impl ImageRef {
    /// Deduplication key for counting an image once per app.
    pub fn app_image_key(&self) -> String {
        format!("{}/{}", self.app_id, self.path)
    }
}

/// A raw vulnerability scan for one image path, as returned by the scan
/// service. Wire names are PascalCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Scan {
    pub schema_version: u32,
    pub created_at: String,
    pub artifact_name: String,
    pub results: Vec<ScanResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScanResult {
    pub target: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub vulnerabilities: Vec<Vulnerability>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Vulnerability {
    #[serde(rename = "VulnerabilityID")]
    pub vulnerability_id: String,
    pub pkg_name: String,
    pub installed_version: String,
    pub severity: String,
    pub title: String,
}
