// ABOUTME: SpiceSync HTTP backend binary
// ABOUTME: Loads configuration, initializes logging from it, and serves the recipe API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # SpiceSync Server Binary
//!
//! ```bash
//! OPENROUTER_API_KEY=sk-or-... spicesync-server --http-port 8080
//! ```

use anyhow::Result;
use clap::Parser;
use spicesync::{config::ServerConfig, logging::LoggingConfig, server};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "spicesync-server")]
#[command(about = "SpiceSync - ingredient-driven recipe generation API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the LLM model
    #[arg(long)]
    model: Option<String>,

    /// Override the static asset directory
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    LoggingConfig::for_server(&config).init()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }

    info!("Starting SpiceSync server v{}", env!("CARGO_PKG_VERSION"));
    server::serve(config).await
}
