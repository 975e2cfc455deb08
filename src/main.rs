//! Gatecheck - project readiness assessment CLI
//!
//! Probes a project's expected module architecture, verifies its build,
//! and scores readiness against performance and scenario targets.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gatecheck::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_logging(&cli.log_level, &cli.log_file_path())?;

    cli::run(cli)
}

/// Initialize logging: a console layer plus a plain-text layer writing
/// the run log artifact. `RUST_LOG` overrides the CLI level when set.
fn init_logging(level: &str, log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let log_file = File::create(log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .init();

    Ok(())
}
