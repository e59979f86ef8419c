// ABOUTME: User account database operations
// ABOUTME: Registration creates the user and its empty profile in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{now_rfc3339, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Profile, User};

/// Columns selected for a user joined with its profile
const USER_WITH_PROFILE_SELECT: &str = r"
    SELECT u.id, u.email, u.name, u.password_hash, u.created_at, u.updated_at,
           p.id AS profile_id, p.bio AS profile_bio, p.avatar AS profile_avatar,
           p.created_at AS profile_created_at, p.updated_at AS profile_updated_at
    FROM users u
    LEFT JOIN profiles p ON p.user_id = u.id
";

/// Fields for a new account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Normalized email
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash
    pub password_hash: String,
}

/// Partial account update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New email
    pub email: Option<String>,
    /// New display name
    pub name: Option<String>,
    /// New bcrypt hash
    pub password_hash: Option<String>,
}

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        Ok(())
    }

    /// Create a user together with its empty profile
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the email is taken, or a database error
    pub async fn create_user(&self, new_user: &NewUser) -> AppResult<User> {
        let now = now_rfc3339();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let user_id = sqlx::query(
            r"
            INSERT INTO users (email, name, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| match AppError::from(e) {
            conflict if conflict.http_status() == 409 => {
                AppError::already_exists(format!("Email {} is already registered", new_user.email))
            }
            other => other,
        })?
        .last_insert_rowid();

        let profile_id = sqlx::query(
            r"
            INSERT INTO profiles (bio, avatar, user_id, created_at, updated_at)
            VALUES ('', '', $1, $2, $2)
            ",
        )
        .bind(user_id)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create profile: {e}")))?
        .last_insert_rowid();

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit user creation: {e}")))?;

        Ok(User {
            id: user_id,
            email: new_user.email.clone(),
            name: new_user.name.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: now.clone(),
            updated_at: now.clone(),
            profile: Some(Profile {
                id: profile_id,
                bio: String::new(),
                avatar: String::new(),
                user_id,
                created_at: now.clone(),
                updated_at: now,
            }),
        })
    }

    /// Get a user (with profile) by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, user_id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("{USER_WITH_PROFILE_SELECT} WHERE u.id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        Ok(row.as_ref().map(row_to_user))
    }

    /// Get a user (with profile) by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("{USER_WITH_PROFILE_SELECT} WHERE u.email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        Ok(row.as_ref().map(row_to_user))
    }

    /// List every user ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query(&format!("{USER_WITH_PROFILE_SELECT} ORDER BY u.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        Ok(rows.iter().map(row_to_user).collect())
    }

    /// Apply a partial update; returns `None` if the user does not exist
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the new email is taken, or a database error
    pub async fn update_user(&self, user_id: i64, patch: &UserPatch) -> AppResult<Option<User>> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET email = COALESCE($1, email),
                name = COALESCE($2, name),
                password_hash = COALESCE($3, password_hash),
                updated_at = $4
            WHERE id = $5
            ",
        )
        .bind(patch.email.as_deref())
        .bind(patch.name.as_deref())
        .bind(patch.password_hash.as_deref())
        .bind(now_rfc3339())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_user(user_id).await
    }

    /// Delete a user; profile, recipes and favorites cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_user(&self, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_user(row: &SqliteRow) -> User {
    let user_id: i64 = row.get("id");
    let profile = row
        .get::<Option<i64>, _>("profile_id")
        .map(|profile_id| Profile {
            id: profile_id,
            bio: row.get("profile_bio"),
            avatar: row.get("profile_avatar"),
            user_id,
            created_at: row.get("profile_created_at"),
            updated_at: row.get("profile_updated_at"),
        });

    User {
        id: user_id,
        email: row.get("email"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        profile,
    }
}
