// ABOUTME: Repository traits decoupling services from the concrete database
// ABOUTME: Lets the recipe service run against SQLite or a test double
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repository pattern for the recipe record store
//!
//! The recipe service (CRUD and generation auto-save) only needs the narrow
//! record-store surface below, so it depends on the trait rather than on
//! [`Database`](super::Database).

mod recipe_repository;

pub use recipe_repository::RecipeRepositoryImpl;

use async_trait::async_trait;

use super::RecipePatch;
use crate::errors::AppResult;
use crate::models::{Recipe, RecipeDraft};

/// Record store for recipes
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a new recipe for `owner_id` and return it with id and timestamps
    async fn save(&self, owner_id: i64, draft: &RecipeDraft) -> AppResult<Recipe>;

    /// Find a recipe by id regardless of owner
    async fn find_by_id(&self, recipe_id: i64) -> AppResult<Option<Recipe>>;

    /// All recipes owned by `owner_id`, newest first
    async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Recipe>>;

    /// Apply a partial update
    async fn update(&self, recipe_id: i64, patch: &RecipePatch) -> AppResult<Option<Recipe>>;

    /// Delete a recipe; `false` if it did not exist
    async fn delete(&self, recipe_id: i64) -> AppResult<bool>;
}
