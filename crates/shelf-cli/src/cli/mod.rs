//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use shelf_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(version = "0.1")]
#[command(about = "Author search dashboard for the open book catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run a one-shot author search and print the results
    Search {
        /// Author name to search for
        #[arg(short, long)]
        author: String,

        /// Rows per page (default: configured page size)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u64,

        /// Write books.csv to this directory instead of printing a table
        #[arg(long, value_name = "DIR")]
        csv: Option<std::path::PathBuf>,
    },

    /// Sign in and persist the session
    Login {
        /// Email to sign in with (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Clear the persisted session
    Logout,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = crate::logging::init();

    let config = Config::load().context("load config")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    // default to the dashboard
    let Some(command) = cli.command else {
        return commands::dashboard::run(&config).await;
    };

    match command {
        Commands::Search {
            author,
            limit,
            page,
            csv,
        } => commands::search::run(&config, &author, limit, page, csv.as_deref()).await,
        Commands::Login { email } => commands::login::run_login(&config, email.as_deref()).await,
        Commands::Logout => commands::login::run_logout(),
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
        },
    }
}
