mod cli;
mod commands;
mod setup;

use anyhow::Result;
use clap::Parser;
use dashboard_core::config::AppConfig;
use dashboard_core::lifecycle;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    lifecycle::init_tracing(cli.verbose);

    let config = AppConfig::load_or_default(cli.config.as_deref());
    lifecycle::log_startup();

    let result = match cli.command {
        Commands::Login { username, password } => {
            commands::login(&config, username, password).await
        }
        Commands::Logout => commands::logout(&config).await,
        Commands::Whoami => commands::whoami(&config).await,
        Commands::ClearCache => commands::clear_cache(&config).await,
        Commands::Get { path } => commands::get(&config, path).await,
    };

    lifecycle::log_shutdown();
    result
}
