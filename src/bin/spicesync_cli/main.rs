// ABOUTME: SpiceSync CLI - terminal front end for recipe generation and favorites
// ABOUTME: Talks to a running spicesync-server and keeps favorites in the local data dir
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors
//!
//! Usage:
//! ```bash
//! # Generate recipes from what is in the fridge
//! spicesync-cli generate carrot onion rice --cuisine Thai --language fr
//!
//! # Open the second result with nutrition and save it
//! spicesync-cli generate carrot onion --show 2 --save
//!
//! # Manage favorites
//! spicesync-cli favorites list
//! spicesync-cli favorites show 1 --whole-recipe
//! spicesync-cli favorites export --output ~/recipes.json
//! spicesync-cli favorites clear --yes
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spicesync::{config::ClientConfig, logging::LoggingConfig};
use std::path::PathBuf;
use tracing::debug;

use commands::{favorites::FavoritesCommand, generate::GenerateArgs};

#[derive(Parser)]
#[command(
    name = "spicesync-cli",
    about = "SpiceSync recipe generator CLI",
    long_about = "Generate recipes from your ingredients through a SpiceSync server and manage local favorites."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend URL override
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Favorites directory override
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Render HTML fragments instead of plain text
    #[arg(long, global = true)]
    html: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate recipes from ingredients
    Generate(GenerateArgs),

    /// Favorites management commands
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "Client configuration");

    let output = output::Output::new(cli.html);
    match cli.command {
        Command::Generate(args) => commands::generate::run(args, &config, &output).await,
        Command::Favorites { action } => commands::favorites::run(action, &config, &output).await,
    }
}
