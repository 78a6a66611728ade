//! Print effective indicator parameters.

use anyhow::Result;
use insight_config::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let text = toml::to_string_pretty(&config.indicators)?;
    println!("[indicators]");
    print!("{text}");
    Ok(())
}
