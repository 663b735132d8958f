//! Fetch-and-aggregate pipeline.
//!
//! Drives the per-image fetch loop through the token broker and scan
//! fetcher, deduplicates fetch work per image path, applies the filter, and
//! accumulates the cross-app vulnerability views consumed by the reporters.

pub mod collector;

pub use collector::{ScanCollector, VulnSummary};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation for a run. Checked between images; a cancelled
/// run aborts without producing a summary.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
