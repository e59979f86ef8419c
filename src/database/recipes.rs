// ABOUTME: Recipe database operations
// ABOUTME: Recipes are owned by a user and listed newest first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{now_rfc3339, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, RecipeDraft};

const RECIPE_COLUMNS: &str =
    "id, title, ingredients, steps, style, user_id, created_at, updated_at";

/// Partial recipe update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePatch {
    /// New title
    pub title: Option<String>,
    /// New ingredient list
    pub ingredients: Option<String>,
    /// New steps
    pub steps: Option<String>,
    /// New style tag
    pub style: Option<String>,
}

impl Database {
    /// Create the recipes table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                steps TEXT NOT NULL,
                style TEXT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipes table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_user_id ON recipes(user_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create recipes index: {e}")))?;

        Ok(())
    }

    /// Insert a recipe owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown owner)
    pub async fn create_recipe(&self, user_id: i64, draft: &RecipeDraft) -> AppResult<Recipe> {
        let now = now_rfc3339();
        let id = sqlx::query(
            r"
            INSERT INTO recipes (title, ingredients, steps, style, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ",
        )
        .bind(&draft.title)
        .bind(&draft.ingredients)
        .bind(&draft.steps)
        .bind(draft.style.as_deref())
        .bind(user_id)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?
        .last_insert_rowid();

        Ok(Recipe {
            id,
            title: draft.title.clone(),
            ingredients: draft.ingredients.clone(),
            steps: draft.steps.clone(),
            style: draft.style.clone(),
            user_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a recipe by id regardless of owner
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_recipe(&self, recipe_id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"))
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        Ok(row.as_ref().map(row_to_recipe))
    }

    /// List a user's recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_recipes_by_user(&self, user_id: i64) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        Ok(rows.iter().map(row_to_recipe).collect())
    }

    /// Apply a partial update; returns `None` if the recipe does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_recipe(
        &self,
        recipe_id: i64,
        patch: &RecipePatch,
    ) -> AppResult<Option<Recipe>> {
        let result = sqlx::query(
            r"
            UPDATE recipes
            SET title = COALESCE($1, title),
                ingredients = COALESCE($2, ingredients),
                steps = COALESCE($3, steps),
                style = COALESCE($4, style),
                updated_at = $5
            WHERE id = $6
            ",
        )
        .bind(patch.title.as_deref())
        .bind(patch.ingredients.as_deref())
        .bind(patch.steps.as_deref())
        .bind(patch.style.as_deref())
        .bind(now_rfc3339())
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_recipe(recipe_id).await
    }

    /// Delete a recipe; favorites pointing at it cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_recipe(&self, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

pub(super) fn row_to_recipe(row: &SqliteRow) -> Recipe {
    Recipe {
        id: row.get("id"),
        title: row.get("title"),
        ingredients: row.get("ingredients"),
        steps: row.get("steps"),
        style: row.get("style"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
