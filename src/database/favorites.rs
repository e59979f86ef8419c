// ABOUTME: Favorite database operations
// ABOUTME: Enforces one favorite per (user, recipe) and joins the recipe on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{now_rfc3339, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Favorite, Recipe};

const FAVORITE_WITH_RECIPE_SELECT: &str = r"
    SELECT f.id, f.user_id, f.recipe_id, f.created_at,
           r.id AS r_id, r.title AS r_title, r.ingredients AS r_ingredients,
           r.steps AS r_steps, r.style AS r_style, r.user_id AS r_user_id,
           r.created_at AS r_created_at, r.updated_at AS r_updated_at
    FROM favorites f
    LEFT JOIN recipes r ON r.id = f.recipe_id
";

impl Database {
    /// Create the favorites table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_favorites(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE (user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create favorites table: {e}")))?;

        Ok(())
    }

    /// Mark a recipe as favorite for a user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the pair already exists, or a database error
    pub async fn create_favorite(&self, user_id: i64, recipe_id: i64) -> AppResult<Favorite> {
        let now = now_rfc3339();
        let id = sqlx::query(
            r"
            INSERT INTO favorites (user_id, recipe_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(recipe_id)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            conflict if conflict.http_status() == 409 => {
                AppError::already_exists("Recipe already in favorites")
            }
            other => other,
        })?
        .last_insert_rowid();

        Ok(Favorite {
            id,
            user_id,
            recipe_id,
            created_at: now,
            recipe: self.get_recipe(recipe_id).await?,
        })
    }

    /// List a user's favorites with their recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_favorites_by_user(&self, user_id: i64) -> AppResult<Vec<Favorite>> {
        let rows = sqlx::query(&format!(
            "{FAVORITE_WITH_RECIPE_SELECT} WHERE f.user_id = $1 ORDER BY f.created_at DESC, f.id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        Ok(rows.iter().map(row_to_favorite).collect())
    }

    /// Get a favorite by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_favorite(&self, favorite_id: i64) -> AppResult<Option<Favorite>> {
        let row = sqlx::query(&format!("{FAVORITE_WITH_RECIPE_SELECT} WHERE f.id = $1"))
            .bind(favorite_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get favorite: {e}")))?;

        Ok(row.as_ref().map(row_to_favorite))
    }

    /// Delete a favorite by id
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_favorite(&self, favorite_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(favorite_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the favorite linking `user_id` to `recipe_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_favorite_by_recipe(&self, user_id: i64, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_favorite(row: &SqliteRow) -> Favorite {
    let recipe = row.get::<Option<i64>, _>("r_id").map(|recipe_id| Recipe {
        id: recipe_id,
        title: row.get("r_title"),
        ingredients: row.get("r_ingredients"),
        steps: row.get("r_steps"),
        style: row.get("r_style"),
        user_id: row.get("r_user_id"),
        created_at: row.get("r_created_at"),
        updated_at: row.get("r_updated_at"),
    });

    Favorite {
        id: row.get("id"),
        user_id: row.get("user_id"),
        recipe_id: row.get("recipe_id"),
        created_at: row.get("created_at"),
        recipe,
    }
}
