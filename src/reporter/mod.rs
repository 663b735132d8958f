pub mod json;
pub mod progress;
pub mod table;
pub mod terminal;

pub use progress::FetchProgress;

use crate::aggregator::VulnSummary;
use crate::cli::OutputFormat;

pub trait Reporter {
    fn report(&self, summary: &VulnSummary) -> String;
}

/// Unified output formatter that selects the appropriate reporter.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, summary: &VulnSummary) -> String {
        match self.format {
            OutputFormat::Terminal => terminal::TerminalReporter::new().report(summary),
            OutputFormat::Json => json::JsonReporter::new().report(summary),
        }
    }
}
