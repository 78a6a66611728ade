//! Validate configuration command.

use anyhow::Result;
use insight_config::AppConfig;
use insight_core::InsightResult;
use std::path::Path;

pub fn run(config_path: &Path, loaded: InsightResult<AppConfig>) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    if !config_path.exists() {
        println!("File not found, using built-in defaults");
    }

    match loaded {
        Ok(config) => {
            let params = &config.indicators;
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("RSI period: {}", params.rsi_period);
            println!(
                "MACD: {}/{}/{}",
                params.macd_fast, params.macd_slow, params.macd_signal
            );
            println!(
                "Bollinger: {} bars, {} std dev",
                params.bollinger_period, params.bollinger_std_dev
            );
            println!("Moving averages: {:?}", params.ma_periods);
            println!(
                "Support/resistance window: {}",
                params.support_resistance_window
            );
            println!("Minimum data points: {}", config.data.min_data_points);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
