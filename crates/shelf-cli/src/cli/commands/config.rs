//! Config command handlers.

use anyhow::{Context, Result};
use shelf_core::config::{Config, paths};

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let config_path = paths::config_path();
    Config::init(&config_path)?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn show(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("serialize config")?;
    print!("{rendered}");
    Ok(())
}
