use crate::aggregator::VulnSummary;
use crate::reporter::Reporter;
use crate::scan::vuln_id::cmp_vuln_id;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable JSON view of the aggregate state. Vulnerability IDs are listed in
/// the same order as the terminal matrix rows.
#[derive(Serialize)]
struct JsonReport<'a> {
    images: Vec<JsonImage<'a>>,
    all_vuln_ids: Vec<&'a str>,
    vulns_by_app: &'a BTreeMap<String, BTreeSet<String>>,
}

#[derive(Serialize)]
struct JsonImage<'a> {
    org: &'a str,
    app: &'a str,
    machine: &'a str,
    path: &'a str,
    skipped: bool,
}

impl Reporter for JsonReporter {
    fn report(&self, summary: &VulnSummary) -> String {
        let mut all_vuln_ids: Vec<&str> =
            summary.all_vuln_ids.iter().map(String::as_str).collect();
        all_vuln_ids.sort_by(|a, b| cmp_vuln_id(a, b));
        all_vuln_ids.reverse();

        let report = JsonReport {
            images: summary
                .images
                .iter()
                .map(|image| JsonImage {
                    org: &image.org,
                    app: &image.app,
                    machine: &image.machine,
                    path: &image.path,
                    skipped: summary.is_skipped(image),
                })
                .collect(),
            all_vuln_ids,
            vulns_by_app: &summary.vulns_by_app,
        };

        serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::types::{ImageRef, Scan};

    fn summary() -> VulnSummary {
        let mut summary = VulnSummary {
            images: vec![
                ImageRef {
                    org_id: "org1".to_string(),
                    org: "acme".to_string(),
                    app_id: "app1".to_string(),
                    app: "api".to_string(),
                    machine: "m1".to_string(),
                    path: "/img1".to_string(),
                },
                ImageRef {
                    org_id: "org1".to_string(),
                    org: "acme".to_string(),
                    app_id: "app2".to_string(),
                    app: "worker".to_string(),
                    machine: "m2".to_string(),
                    path: "/img2".to_string(),
                },
            ],
            ..VulnSummary::default()
        };
        summary.scans.insert("/img1".to_string(), Some(Scan::default()));
        summary.scans.insert("/img2".to_string(), None);
        summary.all_vuln_ids.insert("CVE-2023-1".to_string());
        summary.all_vuln_ids.insert("CVE-2024-5".to_string());
        summary.vulns_by_app.insert(
            "api".to_string(),
            ["CVE-2023-1", "CVE-2024-5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        summary
    }

    #[test]
    fn test_json_structure() {
        let output = JsonReporter::new().report(&summary());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["images"][0]["app"], "api");
        assert_eq!(parsed["images"][0]["skipped"], false);
        assert_eq!(parsed["images"][1]["skipped"], true);
        assert_eq!(parsed["vulns_by_app"]["api"][0], "CVE-2023-1");
    }

    #[test]
    fn test_json_vuln_ids_ordered_like_matrix_rows() {
        let output = JsonReporter::new().report(&summary());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["all_vuln_ids"][0], "CVE-2024-5");
        assert_eq!(parsed["all_vuln_ids"][1], "CVE-2023-1");
    }

    #[test]
    fn test_json_empty_summary() {
        let output = JsonReporter::new().report(&VulnSummary::default());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["images"].as_array().unwrap().is_empty());
        assert!(parsed["all_vuln_ids"].as_array().unwrap().is_empty());
    }
}
