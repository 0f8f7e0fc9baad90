//! Dashboard command handler.

use anyhow::{Context, Result};
use shelf_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    shelf_tui::run_dashboard(config)
        .await
        .context("dashboard failed")
}
