// ABOUTME: Server binary for the ChefGPT recipe API
// ABOUTME: Loads configuration, initializes logging and the database, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # ChefGPT API Server Binary
//!
//! Starts the recipe API with user authentication, the `SQLite` store and,
//! when `GEMINI_API_KEY` is set, AI recipe generation.

use std::sync::Arc;

use anyhow::Result;
use chefgpt_server::{
    config::{GenerationAvailability, ServerConfig},
    database::Database,
    logging::{self, AppLogger},
    resources::ServerResources,
    server::ChefGptServer,
};
use clap::Parser;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "chefgpt-server")]
#[command(about = "ChefGPT API - recipes, favorites and AI recipe generation")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Validate configuration, report problems and exit without serving
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    if args.check_config {
        return check_config(&config);
    }

    logging::init_from_env()?;

    info!("Starting ChefGPT API");
    AppLogger::log_configuration(&config.summary(), &config.startup_warnings());
    if config.gemini.availability() == GenerationAvailability::Unconfigured {
        warn!("AI recipe generation is DISABLED until GEMINI_API_KEY is set");
    }

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!(
        "Database initialized successfully: {}",
        database.backend_info()
    );

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(database, Arc::clone(&config)));
    let server = ChefGptServer::new(resources);

    display_available_endpoints(&config);

    if let Err(e) = server.run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Print the configuration summary and warnings to stdout
#[allow(clippy::print_stdout)]
fn check_config(config: &ServerConfig) -> Result<()> {
    println!("{}", config.summary());
    let warnings = config.startup_warnings();
    if warnings.is_empty() {
        println!("Configuration OK");
    } else {
        for warning in &warnings {
            println!("WARNING: {warning}");
        }
    }
    Ok(())
}

/// Display all available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);

    info!("=== Available API Endpoints ===");
    info!("Health:            GET    {base}/health");
    display_auth_endpoints(&base);
    display_recipe_endpoints(&base);
    display_account_endpoints(&base);
    info!("=== End of Endpoint List ===");
}

#[allow(clippy::cognitive_complexity)]
fn display_auth_endpoints(base: &str) {
    info!("Authentication:");
    info!("   Register:        POST   {base}/auth/register");
    info!("   Login:           POST   {base}/auth/login");
}

#[allow(clippy::cognitive_complexity)]
fn display_recipe_endpoints(base: &str) {
    info!("Recipes:");
    info!("   List/Create:     GET|POST {base}/recipes");
    info!("   Generate (AI):   POST   {base}/recipes/ai");
    info!("   Get/Update/Del:  GET|PATCH|DELETE {base}/recipes/{{id}}");
    info!("Favorites:");
    info!("   List/Add:        GET|POST {base}/favorites");
    info!("   Get/Remove:      GET|DELETE {base}/favorites/{{id}}");
    info!("   Remove by recipe: DELETE {base}/favorites/recipe/{{recipeId}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_account_endpoints(base: &str) {
    info!("Users & Profiles:");
    info!("   Users:           GET|POST {base}/users");
    info!("   User:            GET|PATCH|DELETE {base}/users/{{id}}");
    info!("   Profiles:        GET    {base}/profiles");
    info!("   Profile:         GET|PATCH|DELETE {base}/profiles/{{id}}");
    info!("   Profile by user: GET    {base}/profiles/user/{{userId}}");
}
