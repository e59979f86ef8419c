// ABOUTME: SQLite implementation of the recipe repository
// ABOUTME: Delegates to the `Database` recipe operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use super::RecipeRepository;
use crate::database::{Database, RecipePatch};
use crate::errors::AppResult;
use crate::models::{Recipe, RecipeDraft};

/// `SQLite` implementation of [`RecipeRepository`]
#[derive(Clone, Debug)]
pub struct RecipeRepositoryImpl {
    db: Database,
}

impl RecipeRepositoryImpl {
    /// Create a new `RecipeRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeRepository for RecipeRepositoryImpl {
    async fn save(&self, owner_id: i64, draft: &RecipeDraft) -> AppResult<Recipe> {
        self.db.create_recipe(owner_id, draft).await
    }

    async fn find_by_id(&self, recipe_id: i64) -> AppResult<Option<Recipe>> {
        self.db.get_recipe(recipe_id).await
    }

    async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Recipe>> {
        self.db.list_recipes_by_user(owner_id).await
    }

    async fn update(&self, recipe_id: i64, patch: &RecipePatch) -> AppResult<Option<Recipe>> {
        self.db.update_recipe(recipe_id, patch).await
    }

    async fn delete(&self, recipe_id: i64) -> AppResult<bool> {
        self.db.delete_recipe(recipe_id).await
    }
}
