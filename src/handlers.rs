//! Run orchestration for the CLI.

use crate::aggregator::ScanCollector;
use crate::api::{HttpRegistryApi, ImageQuery, RegistryApi};
use crate::cli::Cli;
use crate::config::{CONFIG_FILE_NAME, EffectiveConfig, FileConfig};
use crate::error::{AuditError, Result};
use crate::reporter::{FetchProgress, OutputFormatter};
use crate::scan::filter::VulnFilter;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

/// Run the vulnerability summary and map the outcome to an exit code. On a
/// fatal error nothing is printed beyond a single error description.
pub fn run_summary(cli: &Cli) -> ExitCode {
    match summarize(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn summarize(cli: &Cli) -> Result<()> {
    if cli.ci {
        colored::control::set_override(false);
    }

    // Validate user input before touching configuration or the network.
    let filter = VulnFilter::from_args(&cli.vuln_ids, cli.severity.as_deref())?;
    if cli.app.is_none() && cli.org.is_none() {
        return Err(AuditError::Config(
            "specify an app (--app) or an org (--org) to scan".to_string(),
        ));
    }

    let file = load_file_config(cli)?;
    let config =
        EffectiveConfig::resolve(cli.api_url.as_deref(), cli.auth_token.as_deref(), file)?;
    let api = HttpRegistryApi::new(&config)?;

    let query = ImageQuery {
        org: cli.org.clone(),
        app: cli.app.clone(),
        running_only: cli.running,
    };
    let images = api.list_images(&query).map_err(AuditError::ListImages)?;
    if images.is_empty() {
        println!("No images found.");
        return Ok(());
    }
    info!(images = images.len(), "resolved image list");

    let progress = FetchProgress::new(images.len(), std::io::stderr().is_terminal(), cli.ci);
    let summary = ScanCollector::new(&api, &filter).collect(&images, &progress)?;
    progress.finish();

    print!("{}", OutputFormatter::new(cli.format).format(&summary));
    Ok(())
}

/// Load the config file. An explicitly passed `--config` path must exist;
/// the default `.reg-audit.yaml` is optional.
fn load_file_config(cli: &Cli) -> Result<Option<FileConfig>> {
    match &cli.config {
        Some(path) => match FileConfig::load(path)? {
            Some(file) => Ok(Some(file)),
            None => Err(AuditError::Config(format!(
                "config file not found: {}",
                path.display()
            ))),
        },
        None => FileConfig::load(Path::new(CONFIG_FILE_NAME)),
    }
}
