//! CLI definition and run entry point

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use tracing::{info, warn};

use crate::config::AssessmentConfig;
use crate::pipeline::Pipeline;
use crate::reporters::{self, OutputFormat};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Gatecheck - project readiness assessment
///
/// Probes expected modules, verifies the build, and scores structural
/// completeness against performance and scenario targets.
#[derive(Parser, Debug)]
#[command(name = "gatecheck")]
#[command(
    version,
    about = "Assess the structural completeness and readiness of a multi-module project",
    long_about = "Gatecheck checks an expected module architecture against what is actually \
on disk, runs the project build once, estimates test coverage, and tracks performance \
benchmarks and end-to-end scenarios. The result is a weighted readiness score with \
improvement recommendations, written as JSON and Markdown reports plus a run log.",
    after_help = "\
Examples:
  gatecheck /path/to/project                 Assess a project
  gatecheck . --skip-build                   Structural checks only
  gatecheck . --out-dir reports              Write artifacts to reports/
  gatecheck . --format json                  Print the JSON form to stdout

Configuration: place a gatecheck.toml at the project root to override the
expected module lists, layout conventions, and build command."
)]
pub struct Cli {
    /// Path to the project root to assess
    pub root: PathBuf,

    /// Output format printed to stdout: text, json, markdown (or md)
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
    pub format: String,

    /// Directory for the report artifacts (default: current directory)
    #[arg(long, short = 'o', default_value = ".")]
    pub out_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel probe workers (1-64)
    #[arg(long, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    /// Skip the build invocation (all modules stay non-buildable)
    #[arg(long)]
    pub skip_build: bool,
}

impl Cli {
    /// Path of the run log artifact.
    pub fn log_file_path(&self) -> PathBuf {
        self.out_dir.join("gatecheck.log")
    }
}

/// Run an assessment from parsed CLI arguments.
pub fn run(cli: Cli) -> Result<()> {
    if !cli.root.is_dir() {
        bail!("project root does not exist: {}", cli.root.display());
    }

    let config = match AssessmentConfig::load(&cli.root) {
        Ok(config) => config,
        Err(e) => {
            warn!("{e}; using reference defaults");
            AssessmentConfig::reference()
        }
    };

    let mut pipeline = Pipeline::new(config);
    if cli.skip_build {
        pipeline = pipeline.without_build();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.workers)
        .build()
        .context("failed to build worker pool")?;
    let result = pool.install(|| pipeline.run(&cli.root));

    let json_path = cli.out_dir.join("gatecheck-report.json");
    let md_path = cli.out_dir.join("gatecheck-report.md");
    write_artifact(&json_path, &reporters::render_json(&result)?)?;
    write_artifact(&md_path, &reporters::render_markdown(&result)?)?;

    let format = OutputFormat::from_str(&cli.format)?;
    println!("{}", reporters::report(&result, format)?);

    print_summary(result.overall_score, &json_path, &md_path, &cli.log_file_path());
    Ok(())
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn print_summary(score: f64, json_path: &Path, md_path: &Path, log_path: &Path) {
    let styled_score = if score >= 80.0 {
        style(format!("{score:.1}%")).green().bold()
    } else if score >= 60.0 {
        style(format!("{score:.1}%")).yellow().bold()
    } else {
        style(format!("{score:.1}%")).red().bold()
    };

    println!("{}", style("════════════════════════════════════════").dim());
    println!("Assessment complete. Overall score: {}", styled_score);
    println!("  {} {}", style("json report:").dim(), json_path.display());
    println!("  {} {}", style("markdown report:").dim(), md_path.display());
    println!("  {} {}", style("run log:").dim(), log_path.display());
    println!("{}", style("════════════════════════════════════════").dim());
}
