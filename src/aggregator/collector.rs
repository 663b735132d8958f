//! Scan collection and aggregation.

use crate::aggregator::CancelFlag;
use crate::api::RegistryApi;
use crate::error::{AuditError, Result};
use crate::reporter::FetchProgress;
use crate::scan::filter::{VulnFilter, filter_scan};
use crate::scan::token::TokenBroker;
use crate::scan::types::{ImageRef, Scan};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Aggregated scan state for one run.
#[derive(Debug, Default)]
pub struct VulnSummary {
    /// The original ordered image list; the grouping report iterates this
    /// rather than any container's iteration order.
    pub images: Vec<ImageRef>,
    /// Filtered scan per distinct image path. `None` records an image that
    /// was fetched but skipped as unsupported.
    pub scans: FxHashMap<String, Option<Scan>>,
    /// Every vulnerability ID observed across all apps.
    pub all_vuln_ids: BTreeSet<String>,
    /// Vulnerability IDs observed per app. An app scanned clean keeps an
    /// empty entry, distinguishing it from an app that was never scanned.
    pub vulns_by_app: BTreeMap<String, BTreeSet<String>>,
}

impl VulnSummary {
    /// Whether this image's cached scan entry records a skip.
    pub fn is_skipped(&self, image: &ImageRef) -> bool {
        matches!(self.scans.get(&image.path), Some(None))
    }

    /// Apps with at least one observed vulnerability, alphabetically.
    pub fn apps_with_vulns(&self) -> Vec<&str> {
        self.vulns_by_app
            .iter()
            .filter(|(_, vids)| !vids.is_empty())
            .map(|(app, _)| app.as_str())
            .collect()
    }
}

/// Runs the fetch-and-aggregate loop over an ordered image list.
pub struct ScanCollector<'a> {
    api: &'a dyn RegistryApi,
    filter: &'a VulnFilter,
    cancel: CancelFlag,
}

impl<'a> ScanCollector<'a> {
    pub fn new(api: &'a dyn RegistryApi, filter: &'a VulnFilter) -> Self {
        Self {
            api,
            filter,
            cancel: CancelFlag::new(),
        }
    }

    /// Use an externally owned cancellation flag.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Fetch, filter, and aggregate scans for `images`.
    ///
    /// Fetch work is deduplicated per distinct image path; aggregation is
    /// deduplicated per `(app, path)` pair, so a path cached while
    /// processing one app still counts against every other app using it.
    pub fn collect(&self, images: &[ImageRef], progress: &FetchProgress) -> Result<VulnSummary> {
        let mut scans: FxHashMap<String, Option<Scan>> = FxHashMap::default();
        let mut broker = TokenBroker::new(self.api);

        for image in images {
            if self.cancel.is_cancelled() {
                return Err(AuditError::Cancelled);
            }
            if scans.contains_key(&image.path) {
                progress.inc();
                continue;
            }

            let token = broker.token(&image.org_id, &image.app_id)?;
            match self.api.fetch_scan(&image.path, &token) {
                Ok(scan) => {
                    debug!(path = %image.path, "fetched scan");
                    scans.insert(image.path.clone(), Some(filter_scan(&scan, self.filter)));
                }
                Err(err) if err.is_unsupported_repository() => {
                    warn!(
                        app = %image.app,
                        machine = %image.machine,
                        path = %image.path,
                        "skipping image from unsupported repository"
                    );
                    scans.insert(image.path.clone(), None);
                }
                Err(source) => {
                    return Err(AuditError::Scan {
                        app: image.app.clone(),
                        machine: image.machine.clone(),
                        source,
                    });
                }
            }
            progress.inc();
        }

        let mut summary = VulnSummary {
            images: images.to_vec(),
            scans,
            ..VulnSummary::default()
        };
        aggregate(&mut summary);
        Ok(summary)
    }
}

/// Build the cross-app views from the populated scan cache. Each distinct
/// `(app, path)` pair contributes exactly once.
fn aggregate(summary: &mut VulnSummary) {
    let mut counted: FxHashSet<String> = FxHashSet::default();

    for image in &summary.images {
        let Some(Some(scan)) = summary.scans.get(&image.path) else {
            continue;
        };
        if !counted.insert(image.app_image_key()) {
            continue;
        }

        let app_vids = summary.vulns_by_app.entry(image.app.clone()).or_default();
        for result in &scan.results {
            for vuln in &result.vulnerabilities {
                summary.all_vuln_ids.insert(vuln.vulnerability_id.clone());
                app_vids.insert(vuln.vulnerability_id.clone());
            }
        }
    }
}
