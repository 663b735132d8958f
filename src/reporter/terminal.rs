use crate::aggregator::VulnSummary;
use crate::reporter::Reporter;
use crate::reporter::table::render_table;
use crate::scan::vuln_id::cmp_vuln_id;
use colored::Colorize;

/// Presence marker in the vulnerability matrix.
const PRESENT: &str = "X";
/// Absence marker in the vulnerability matrix.
const ABSENT: &str = "-";

pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    fn format_image_listing(&self, summary: &VulnSummary) -> String {
        let mut out = String::new();
        out.push_str("Scanned images\n");

        let mut last_org: Option<&str> = None;
        let mut last_app: Option<&str> = None;
        for image in &summary.images {
            if last_org != Some(image.org.as_str()) {
                out.push_str(&format!("Org: {}\n", image.org.bold()));
                last_org = Some(&image.org);
            }
            if last_app != Some(image.app.as_str()) {
                out.push_str(&format!("  App: {}\n", image.app.cyan()));
                last_app = Some(&image.app);
            }
            if summary.is_skipped(image) {
                out.push_str(&format!(
                    "    {}  {} {}\n",
                    image.machine,
                    image.path,
                    "[skipped]".yellow()
                ));
            } else {
                out.push_str(&format!("    {}  {}\n", image.machine, image.path));
            }
        }
        out
    }

    fn format_matrix(&self, summary: &VulnSummary) -> String {
        let apps = summary.apps_with_vulns();

        // Rows in domain order, most recent first. Cells stay uncolored so
        // column widths are byte-accurate.
        let mut vids: Vec<&str> = summary.all_vuln_ids.iter().map(String::as_str).collect();
        vids.sort_by(|a, b| cmp_vuln_id(a, b));
        vids.reverse();

        if vids.is_empty() {
            return "No vulnerabilities found.\n".to_string();
        }

        let mut headers: Vec<String> = vec![String::new()];
        headers.extend(apps.iter().map(|app| app.to_string()));

        let rows: Vec<Vec<String>> = vids
            .iter()
            .map(|vid| {
                let mut row = vec![vid.to_string()];
                for app in &apps {
                    let present = summary
                        .vulns_by_app
                        .get(*app)
                        .is_some_and(|vids| vids.contains(*vid));
                    row.push(if present { PRESENT } else { ABSENT }.to_string());
                }
                row
            })
            .collect();

        render_table("Vulnerabilities in Apps", &headers, &rows)
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, summary: &VulnSummary) -> String {
        let mut out = self.format_image_listing(summary);
        out.push('\n');
        out.push_str(&self.format_matrix(summary));
        out
    }
}
