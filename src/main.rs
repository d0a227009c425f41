//! Declutter: cloud-storage declutter scanner.
//!
//! Thin binary entry point. All logic lives in the `declutter-core`
//! and `declutter-cli` crates.
use clap::Parser;
use declutter_cli::{failure_message, run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so a JSON report on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Declutter starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {e:?}");
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}
