//! Fig & Clover CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run registry database migrations
//! fc-cli migrate
//!
//! # Load the gift catalog from a YAML file
//! fc-cli seed --file gifts.yaml
//!
//! # Replace unreserved gifts with the file's contents
//! fc-cli seed --file gifts.yaml --replace
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Load the gift catalog into the registry

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(author, version, about = "Fig & Clover CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run registry database migrations
    Migrate,
    /// Load the gift catalog from a YAML file
    Seed {
        /// Path to the catalog YAML file
        #[arg(short, long)]
        file: String,

        /// Delete unreserved gifts not present in the file
        #[arg(long, default_value_t = false)]
        replace: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, replace } => commands::seed::gifts(&file, replace).await?,
    }
    Ok(())
}
