//! Market insight CLI application.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use insight_config::{load_config, AppConfig};
use insight_core::InsightResult;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(&cli.config);

    // Logging falls back to defaults so a broken config can still be reported
    let logging_config = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    let level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| logging_config.level.clone());
    let _guard = logging::setup_logging(
        &level,
        cli.json_logs || logging_config.is_json(),
        logging_config.file.as_deref(),
    )?;

    match cli.command {
        Commands::Analyze(args) => {
            cli::commands::analyze::run(args, &require_config(&cli.config, loaded)?).await
        }
        Commands::Params => cli::commands::params::run(&require_config(&cli.config, loaded)?),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, loaded),
    }
}

fn require_config(path: &Path, loaded: InsightResult<AppConfig>) -> Result<AppConfig> {
    loaded.with_context(|| format!("Failed to load configuration from {}", path.display()))
}
