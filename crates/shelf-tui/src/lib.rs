//! Full-screen TUI implementation for the shelf dashboard.

pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use features::{signin, table};
pub use runtime::DashboardRuntime;
use shelf_core::config::Config;

/// Runs the interactive dashboard until the user quits.
pub async fn run_dashboard(config: &Config) -> Result<()> {
    // The dashboard requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `shelf search --author '...'` for non-interactive queries."
        );
    }

    let mut runtime = DashboardRuntime::new(config)?;
    runtime.run()?;

    Ok(())
}
