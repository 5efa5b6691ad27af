#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line pipeline for the party-system and turnout world map.
//!
//! ```text
//! turnout_map generate [--out-dir data/generated]
//! turnout_map diagnostics
//! turnout_map lookup "Russian Federation"
//! ```
//!
//! Sources and aliases come from `turnout_map.toml` (or `--config`);
//! `--classification`, `--turnout` and `--boundaries` override the
//! configured source locations.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::CommandError;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(
    name = "turnout_map",
    about = "Join party-system and voter-turnout data onto world boundaries"
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Party-system classification JSON (path or URL)
    #[arg(long, global = true)]
    classification: Option<String>,

    /// Turnout table, comma- or tab-delimited (path or URL)
    #[arg(long, global = true)]
    turnout: Option<String>,

    /// Country boundaries GeoJSON (path or URL)
    #[arg(long, global = true)]
    boundaries: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the styled map and chart data
    Generate {
        /// Output directory (defaults to the configured one)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print match rates and unmatched countries
    Diagnostics,
    /// Show the joined values for one country
    Lookup {
        /// Country name in any source spelling
        name: String,
    },
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let aliases = config.alias_table()?;
    let locations = config.source_locations(
        cli.classification.as_deref(),
        cli.turnout.as_deref(),
        cli.boundaries.as_deref(),
    );

    let dataset = commands::load_dataset(aliases, &locations).await?;

    match cli.command {
        Commands::Generate { out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.output.dir.clone());
            commands::generate(&dataset, &out_dir).await?;
        }
        Commands::Diagnostics => commands::diagnostics(&dataset),
        Commands::Lookup { name } => commands::lookup(&dataset, &name),
    }

    Ok(())
}
