//! # Venue Booking Main Entry Point
//!
//! This is the main entry point for the venue booking service.

use anyhow::Context;
use clap::{Parser, Subcommand};
use venue_booking::{
    config::ConfigLoader,
    db::{init_pool, run_migrations},
    server::run_server,
    telemetry::init_tracing,
};

#[derive(Debug, Parser)]
#[command(name = "venue-booking", version, about = "Venue, artist and show booking service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Do not apply pending migrations before serving
        #[arg(long)]
        skip_migrations: bool,
    },
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .load()
        .context("Failed to load configuration")?;

    init_tracing(&config).context("Failed to initialise telemetry")?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = init_pool(&config).await?;

    match cli.command.unwrap_or(Command::Serve {
        skip_migrations: false,
    }) {
        Command::Migrate => run_migrations(&db).await,
        Command::Serve { skip_migrations } => {
            if config.run_migrations && !skip_migrations {
                run_migrations(&db).await?;
            } else {
                tracing::info!("Skipping migrations");
            }
            run_server(config, db).await
        }
    }
}
