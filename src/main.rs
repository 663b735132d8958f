use clap::Parser;
use reg_audit::{Cli, handlers::run_summary};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    run_summary(&cli)
}

/// Initialize the tracing subscriber, writing to stderr so the report on
/// stdout stays machine-readable. `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "reg_audit=debug"
    } else {
        "reg_audit=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
