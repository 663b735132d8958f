use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "reg-audit",
    version,
    about = "Summarize possible vulnerabilities in registry images, by app",
    long_about = "reg-audit fetches vulnerability scans for the container images used by \
your apps' machines and reports which vulnerabilities affect which apps.\n\
Limit scanning to a single app if specified. Limit scanning to images used \
by running machines if specified. Limit reporting to specific vulnerability \
IDs or a severity if specified."
)]
pub struct Cli {
    /// Report only these vulnerability IDs (e.g. CVE-2024-5171)
    pub vuln_ids: Vec<String>,

    /// Org to scan; covers every app in the org
    #[arg(short, long)]
    pub org: Option<String>,

    /// Limit scanning to a single app
    #[arg(short, long)]
    pub app: Option<String>,

    /// Only scan images for running machines
    #[arg(short, long)]
    pub running: bool,

    /// Report only issues with a specific severity
    #[arg(short = 'S', long)]
    pub severity: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// CI mode: no colors, no progress bar
    #[arg(long)]
    pub ci: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Platform API base URL (overrides config file and environment)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Platform API auth token (overrides config file and environment)
    #[arg(long, value_name = "TOKEN")]
    pub auth_token: Option<String>,

    /// Path to a config file (defaults to ./.reg-audit.yaml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["reg-audit"]).unwrap();
        assert!(cli.vuln_ids.is_empty());
        assert!(cli.org.is_none());
        assert!(cli.app.is_none());
        assert!(!cli.running);
    }

    #[test]
    fn test_parse_vuln_ids() {
        let cli = Cli::try_parse_from(["reg-audit", "CVE-2024-5171", "CVE-2023-1"]).unwrap();
        assert_eq!(cli.vuln_ids, vec!["CVE-2024-5171", "CVE-2023-1"]);
    }

    #[test]
    fn test_parse_org_and_app() {
        let cli = Cli::try_parse_from(["reg-audit", "-o", "acme", "-a", "api"]).unwrap();
        assert_eq!(cli.org.as_deref(), Some("acme"));
        assert_eq!(cli.app.as_deref(), Some("api"));
    }

    #[test]
    fn test_parse_running() {
        let cli = Cli::try_parse_from(["reg-audit", "-o", "acme", "-r"]).unwrap();
        assert!(cli.running);
    }

    #[test]
    fn test_parse_severity() {
        let cli = Cli::try_parse_from(["reg-audit", "-o", "acme", "-S", "critical"]).unwrap();
        assert_eq!(cli.severity.as_deref(), Some("critical"));
    }

    #[test]
    fn test_parse_format_json() {
        let cli = Cli::try_parse_from(["reg-audit", "-o", "acme", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_parse_ci_mode() {
        let cli = Cli::try_parse_from(["reg-audit", "-o", "acme", "--ci"]).unwrap();
        assert!(cli.ci);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "reg-audit",
            "-o",
            "acme",
            "--api-url",
            "https://api.test",
            "--auth-token",
            "tok_123",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("https://api.test"));
        assert_eq!(cli.auth_token.as_deref(), Some("tok_123"));
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["reg-audit"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Terminal));
        assert!(!cli.ci);
        assert!(!cli.verbose);
        assert!(cli.severity.is_none());
        assert!(cli.config.is_none());
    }
}
