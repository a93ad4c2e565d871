// ABOUTME: Foodapi CLI - operator tool for the recipe API database
// ABOUTME: Mirrors user profiles, issues development tokens, and loads reference data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Mirror an identity-provider profile locally
//! foodapi-cli user create --email cook@example.com --username cook --first-name Ann --last-name Cook
//!
//! # Issue a development token for an existing user
//! foodapi-cli token issue --username cook
//!
//! # Load reference data (relative names resolve against DATA_DIR)
//! foodapi-cli load ingredients
//! foodapi-cli load tags ./fixtures/tags.json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use foodapi_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    errors::AppResult,
};
use tracing::info;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "foodapi-cli",
    about = "Foodapi Management CLI",
    long_about = "Command-line tool for managing Foodapi users, development tokens, and reference data."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// User management commands
    User {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Development token commands
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
    /// Reference data import
    Load {
        #[command(subcommand)]
        target: LoadCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum UserCommand {
    /// Mirror a user profile into the local database
    Create {
        /// Email address
        #[arg(long)]
        email: String,

        /// Login name
        #[arg(long)]
        username: String,

        /// Given name
        #[arg(long, default_value = "")]
        first_name: String,

        /// Family name
        #[arg(long, default_value = "")]
        last_name: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum TokenCommand {
    /// Issue a bearer token signed with the configured secret
    Issue {
        /// Login name of an existing user
        #[arg(long)]
        username: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum LoadCommand {
    /// Import ingredients from a JSON array of `{name, measurement_unit}`
    Ingredients {
        /// Data file (default: ingredients.json in `DATA_DIR`)
        file: Option<String>,
    },
    /// Import tags from a JSON array of `{name, color, slug}`
    Tags {
        /// Data file (default: tags.json in `DATA_DIR`)
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database.url = DatabaseUrl::parse_url(&url)?;
    }

    info!("Connecting to database: {}", config.database.url);
    let database = Database::new(&config.database.url).await?;

    match cli.command {
        Command::User { action } => match action {
            UserCommand::Create {
                email,
                username,
                first_name,
                last_name,
            } => {
                commands::user::create(&database, email, username, first_name, last_name).await?;
            }
        },
        Command::Token { action } => match action {
            TokenCommand::Issue { username } => {
                commands::token::issue(&database, &config, &username).await?;
            }
        },
        Command::Load { target } => match target {
            LoadCommand::Ingredients { file } => {
                commands::load::ingredients(&database, &config, file.as_deref()).await?;
            }
            LoadCommand::Tags { file } => {
                commands::load::tags(&database, &config, file.as_deref()).await?;
            }
        },
    }

    Ok(())
}
