//! Configuration management.
//!
//! Settings come from an optional TOML file, overridden by environment
//! variables prefixed `INSIGHT` with `__` between levels, for example
//! `INSIGHT__INDICATORS__RSI_PERIOD=21`.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use insight_core::error::{InsightError, InsightResult};
use std::path::Path;

/// Load configuration from file and environment.
///
/// A missing file is not an error; every section has defaults. Indicator
/// parameters are validated before the configuration is returned.
pub fn load_config(path: &Path) -> InsightResult<AppConfig> {
    let builder = Config::builder().add_source(File::from(path).required(false));
    finish(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> InsightResult<AppConfig> {
    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix("INSIGHT")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("indicators.ma_periods")
                .try_parsing(true),
        )
        .build()
        .and_then(Config::try_deserialize)
        .map_err(|e| InsightError::Config(e.to_string()))?;

    config
        .indicators
        .validate()
        .map_err(|e| InsightError::Config(e.to_string()))?;

    Ok(config)
}
