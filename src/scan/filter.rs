//! Scan filtering by severity and vulnerability ID.

use crate::error::{AuditError, Result};
use crate::scan::types::{ALLOWED_SEVERITIES, Scan, Vulnerability};
use std::collections::HashSet;

/// Restricts which vulnerabilities are reported. An empty filter passes
/// everything.
#[derive(Debug, Clone, Default)]
pub struct VulnFilter {
    /// Allow-list of vulnerability IDs. Empty means no ID restriction.
    pub vuln_ids: HashSet<String>,
    /// Exact severity to keep, if any.
    pub severity: Option<String>,
}

impl VulnFilter {
    /// Build a filter from CLI arguments, validating the severity value.
    pub fn from_args(vuln_ids: &[String], severity: Option<&str>) -> Result<Self> {
        if let Some(sev) = severity
            && !ALLOWED_SEVERITIES.contains(&sev)
        {
            return Err(AuditError::InvalidSeverity(sev.to_string()));
        }
        Ok(Self {
            vuln_ids: vuln_ids.iter().cloned().collect(),
            severity: severity.map(str::to_string),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.vuln_ids.is_empty() && self.severity.is_none()
    }

    /// Whether a vulnerability passes the filter. Severity comparison is
    /// case-sensitive.
    pub fn matches(&self, vuln: &Vulnerability) -> bool {
        if let Some(sev) = &self.severity
            && vuln.severity != *sev
        {
            return false;
        }
        if !self.vuln_ids.is_empty() && !self.vuln_ids.contains(&vuln.vulnerability_id) {
            return false;
        }
        true
    }
}

/// Return a copy of `scan` keeping only vulnerabilities that pass `filter`.
///
/// Result groups whose vulnerability list becomes empty are retained, so a
/// scanned-but-clean image stays distinguishable from a skipped one.
pub fn filter_scan(scan: &Scan, filter: &VulnFilter) -> Scan {
    let mut filtered = scan.clone();
    for result in &mut filtered.results {
        result.vulnerabilities.retain(|v| filter.matches(v));
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::types::ScanResult;

    fn vuln(id: &str, severity: &str) -> Vulnerability {
        Vulnerability {
            vulnerability_id: id.to_string(),
            severity: severity.to_string(),
            ..Vulnerability::default()
        }
    }

    fn scan_with(vulns: Vec<Vulnerability>) -> Scan {
        Scan {
            results: vec![ScanResult {
                target: "test".to_string(),
                kind: "debian".to_string(),
                vulnerabilities: vulns,
            }],
            ..Scan::default()
        }
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = VulnFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&vuln("CVE-2024-1", "low")));
    }

    #[test]
    fn test_severity_filter_keeps_only_matching() {
        let scan = scan_with(vec![
            vuln("CVE-2024-1", "critical"),
            vuln("CVE-2024-2", "low"),
        ]);
        let filter = VulnFilter::from_args(&[], Some("critical")).unwrap();

        let filtered = filter_scan(&scan, &filter);
        let vulns = &filtered.results[0].vulnerabilities;
        assert_eq!(vulns.len(), 1);
        assert_eq!(vulns[0].vulnerability_id, "CVE-2024-1");
    }

    #[test]
    fn test_severity_match_is_case_sensitive() {
        let filter = VulnFilter::from_args(&[], Some("critical")).unwrap();
        assert!(!filter.matches(&vuln("CVE-2024-1", "CRITICAL")));
        assert!(filter.matches(&vuln("CVE-2024-1", "critical")));
    }

    #[test]
    fn test_id_allow_list() {
        let ids = vec!["CVE-2024-1".to_string()];
        let filter = VulnFilter::from_args(&ids, None).unwrap();
        assert!(filter.matches(&vuln("CVE-2024-1", "low")));
        assert!(!filter.matches(&vuln("CVE-2024-2", "critical")));
    }

    #[test]
    fn test_id_and_severity_both_required() {
        let ids = vec!["CVE-2024-1".to_string()];
        let filter = VulnFilter::from_args(&ids, Some("high")).unwrap();
        assert!(filter.matches(&vuln("CVE-2024-1", "high")));
        assert!(!filter.matches(&vuln("CVE-2024-1", "low")));
        assert!(!filter.matches(&vuln("CVE-2024-2", "high")));
    }

    #[test]
    fn test_invalid_severity_rejected() {
        let err = VulnFilter::from_args(&[], Some("severe")).unwrap_err();
        assert!(matches!(err, AuditError::InvalidSeverity(_)));
    }

    #[test]
    fn test_emptied_result_groups_are_retained() {
        let scan = scan_with(vec![vuln("CVE-2024-2", "low")]);
        let filter = VulnFilter::from_args(&[], Some("critical")).unwrap();

        let filtered = filter_scan(&scan, &filter);
        assert_eq!(filtered.results.len(), 1);
        assert!(filtered.results[0].vulnerabilities.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let scan = scan_with(vec![
            vuln("CVE-2024-1", "critical"),
            vuln("CVE-2024-2", "low"),
            vuln("CVE-2023-9", "critical"),
        ]);
        let filter = VulnFilter::from_args(&[], Some("critical")).unwrap();

        let once = filter_scan(&scan, &filter);
        let twice = filter_scan(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let scan = scan_with(vec![vuln("CVE-2024-1", "low")]);
        let filter = VulnFilter::from_args(&[], Some("critical")).unwrap();

        let _ = filter_scan(&scan, &filter);
        assert_eq!(scan.results[0].vulnerabilities.len(), 1);
    }
}
