// ABOUTME: HTTP server binary for the recipe-sharing REST API
// ABOUTME: Loads environment configuration, opens the database, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Foodapi Server Binary
//!
//! Starts the recipe API with bearer-token authentication and a `SQLite`
//! store created on first boot.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use foodapi_server::{
    config::{DatabaseUrl, ServerConfig},
    logging,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "foodapi-server")]
#[command(about = "Foodapi - recipe sharing REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&url)?;
    }

    info!("Starting Foodapi server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config).await?);
    info!("Server resources initialized");

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
