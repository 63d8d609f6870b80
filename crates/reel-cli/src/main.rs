mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = reel_config::Config::load()?;

    match cli.command.unwrap_or(cli::Commands::Ui) {
        cli::Commands::Ui => commands::ui::handle(&config).await,
        cli::Commands::Search { query, limit } => {
            commands::search::handle(&config, &query, limit).await
        }
        cli::Commands::ConfigPath => {
            println!("{}", reel_config::Config::config_path().display());
            Ok(())
        }
    }
}
