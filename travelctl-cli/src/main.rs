//! travelctl CLI - travel agency backend
//!
//! Entry point for the `travelctl` binary:
//! - `serve`: run the REST API (locations, holidays, reservations)
//! - `migrate`: create the database schema and exit
//!
//! A `.env` file in the working directory is loaded before arguments are
//! parsed, so `DATABASE_URL` can live there.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(name = "travelctl", version, about = "Travel agency backend: locations, holidays and reservations")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Create missing tables and indexes, then exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }

    Ok(())
}
