// ABOUTME: SQLite database handle, connection setup and schema migrations
// ABOUTME: Entity operations live in sibling modules as `impl Database` blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database
//!
//! A cloneable handle over an sqlx `SqlitePool`. Schema is created with
//! `CREATE TABLE IF NOT EXISTS` statements on [`Database::new`], so a fresh
//! file or in-memory database is usable immediately.

mod favorites;
mod profiles;
mod recipes;
/// Repository traits over the database, used by the service layer
pub mod repositories;
mod users;

pub use recipes::RecipePatch;
pub use users::{NewUser, UserPatch};

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Maximum pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 5;

/// Database handle shared by all request handlers
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and run migrations
    ///
    /// In-memory databases are pinned to a single, never-recycled connection
    /// because every `SQLite` memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails or a
    /// migration statement fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL '{database_url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let is_memory = database_url.contains(":memory:");
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_profiles().await?;
        self.migrate_recipes().await?;
        self.migrate_favorites().await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Backend description for startup logs
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        "SQLite (sqlx)"
    }

    /// Cheap liveness probe used by the health endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}

/// Current time as stored in timestamp columns
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
