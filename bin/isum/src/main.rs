//! isum - Compute and verify ISCC checksums.
//!
//! Thin binary shell: parses arguments, installs logging, delegates to the
//! orchestration crate and maps its outcome to a process exit code. Exit
//! status is 0 on success, 1 on verification failure, 2 on trouble.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use isum_cli::{run, Cli, EXIT_ERROR};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = setup_logging() {
        eprintln!("isum: {err:#}");
        return ExitCode::from(EXIT_ERROR as u8);
    }

    match run(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("isum: {err}");
            ExitCode::from(EXIT_ERROR as u8)
        }
    }
}

/// Diagnostics go to stderr; the checksum grammar on stdout stays clean.
fn setup_logging() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set up logging")
}
