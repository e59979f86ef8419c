// ABOUTME: Profile database operations
// ABOUTME: One profile row per user, created alongside the user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{now_rfc3339, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Profile;

const PROFILE_COLUMNS: &str = "id, bio, avatar, user_id, created_at, updated_at";

impl Database {
    /// Create the profiles table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bio TEXT NOT NULL DEFAULT '',
                avatar TEXT NOT NULL DEFAULT '',
                user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create profiles table: {e}")))?;

        Ok(())
    }

    /// List all profiles
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_profiles(&self) -> AppResult<Vec<Profile>> {
        let rows = sqlx::query(&format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list profiles: {e}")))?;

        Ok(rows.iter().map(row_to_profile).collect())
    }

    /// Get a profile by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_profile(&self, profile_id: i64) -> AppResult<Option<Profile>> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        Ok(row.as_ref().map(row_to_profile))
    }

    /// Get the profile belonging to a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_profile_by_user(&self, user_id: i64) -> AppResult<Option<Profile>> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile for user: {e}")))?;

        Ok(row.as_ref().map(row_to_profile))
    }

    /// Update bio and/or avatar; returns `None` if the profile does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_profile(
        &self,
        profile_id: i64,
        bio: Option<&str>,
        avatar: Option<&str>,
    ) -> AppResult<Option<Profile>> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET bio = COALESCE($1, bio),
                avatar = COALESCE($2, avatar),
                updated_at = $3
            WHERE id = $4
            ",
        )
        .bind(bio)
        .bind(avatar)
        .bind(now_rfc3339())
        .bind(profile_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_profile(profile_id).await
    }

    /// Delete a profile
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_profile(&self, profile_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete profile: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_profile(row: &SqliteRow) -> Profile {
    Profile {
        id: row.get("id"),
        bio: row.get("bio"),
        avatar: row.get("avatar"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
