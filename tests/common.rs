// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, test configuration, in-memory resources and routers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    missing_docs,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `chefgpt_server`
//!
//! Every helper builds on a fresh in-memory `SQLite` database so tests never
//! share state.

use std::env;
use std::sync::{Arc, Once};

use axum::Router;
use chefgpt_server::{
    config::{
        AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, GeminiConfig,
        ServerConfig,
    },
    database::Database,
    generation::RecipeGenerator,
    resources::ServerResources,
    server::ChefGptServer,
};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Signing secret used by every test server
pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration for tests: in-memory database, cheap bcrypt, no Gemini key
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_owned(),
            jwt_expiry_secs: 3_600,
            bcrypt_cost: 4,
        },
        cors: CorsConfig {
            allowed_origins: "*".to_owned(),
        },
        gemini: GeminiConfig::default(),
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("in-memory database")
}

/// Resources over a fresh database, without a recipe generator
pub async fn create_test_resources() -> Arc<ServerResources> {
    create_test_resources_with(None).await
}

/// Resources over a fresh database with the given generator
pub async fn create_test_resources_with(
    generator: Option<Arc<RecipeGenerator>>,
) -> Arc<ServerResources> {
    let database = create_test_database().await;
    let resources =
        ServerResources::new(database, Arc::new(test_config())).with_recipe_generator(generator);
    Arc::new(resources)
}

/// Full application router over the given resources
pub fn router(resources: &Arc<ServerResources>) -> Router {
    ChefGptServer::new(Arc::clone(resources)).router()
}
