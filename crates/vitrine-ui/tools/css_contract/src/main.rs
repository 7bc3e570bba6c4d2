#![forbid(unsafe_code)]
//! CLI entrypoint for the stylesheet contract checker.
//!
//! # Design
//! Delegates to the library implementation and surfaces errors via `anyhow`.

use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Verify that stylesheets define every class the Vitrine controllers use.
#[derive(Debug, Parser)]
#[command(name = "css_contract", version)]
struct Cli {
    /// Directory searched recursively for `*.css` files.
    #[arg(default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/../../static"))]
    dir: PathBuf,
    /// Theme names the page registers with the switcher.
    #[arg(long, value_delimiter = ',', default_values = ["light", "dark"], env = "VITRINE_THEMES")]
    themes: Vec<String>,
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let report = css_contract::check(&cli.dir, &cli.themes)?;
    info!(
        stylesheets = report.stylesheets.len(),
        required = report.required.len(),
        "stylesheets checked"
    );
    if !report.is_satisfied() {
        for class in &report.missing {
            error!(class = %class, "class is not defined");
        }
        bail!("{} required classes are missing", report.missing.len());
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install logging: {err}"))
}
