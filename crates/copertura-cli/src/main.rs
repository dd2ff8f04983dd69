mod lookup;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "copertura")]
#[command(about = "Broadband coverage lookup for Italian street addresses")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the coverage report for one address
    Lookup {
        /// Municipality name (e.g., Milano)
        #[arg(long)]
        city: String,
        /// Street address, with or without a street-type prefix
        #[arg(long)]
        address: String,
        /// Street number (e.g., 12 or 12/A)
        #[arg(long)]
        number: String,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show how an address is split into street type and name
    Normalize {
        /// Raw street address
        address: String,
        /// Prefix vocabulary YAML (defaults to the built-in list)
        #[arg(long, env = "COPERTURA_PREFIXES_PATH")]
        prefixes: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Lookup {
            city,
            address,
            number,
            json,
        }) => {
            let config = copertura_core::load_app_config()?;
            lookup::run_lookup(&config, &city, &address, &number, json).await?;
        }
        Some(Commands::Normalize { address, prefixes }) => {
            lookup::run_normalize(&address, prefixes.as_deref())?;
        }
        None => println!("copertura: run `copertura --help` for available commands"),
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
