// ABOUTME: Favorite business logic scoped to the calling user
// ABOUTME: Checks the recipe exists on add and hides other users' favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Favorite;

/// Favorites of one caller at a time; other users' favorites read as missing
#[derive(Clone, Debug)]
pub struct FavoriteService {
    database: Database,
}

impl FavoriteService {
    /// Create a service over the record store
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Mark `recipe_id` as a favorite of `user_id`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown recipe and
    /// `RESOURCE_ALREADY_EXISTS` if it is already a favorite
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> AppResult<Favorite> {
        if self.database.get_recipe(recipe_id).await?.is_none() {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        self.database.create_favorite(user_id, recipe_id).await
    }

    /// The caller's favorites with their recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<Favorite>> {
        self.database.list_favorites_by_user(user_id).await
    }

    /// One of the caller's favorites
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if it is missing or belongs to someone else
    pub async fn find_one(&self, favorite_id: i64, user_id: i64) -> AppResult<Favorite> {
        self.database
            .get_favorite(favorite_id)
            .await?
            .filter(|favorite| favorite.user_id == user_id)
            .ok_or_else(|| AppError::not_found(format!("Favorite {favorite_id}")))
    }

    /// Delete one of the caller's favorites by id
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` under the same rule as [`Self::find_one`]
    pub async fn remove(&self, favorite_id: i64, user_id: i64) -> AppResult<()> {
        self.find_one(favorite_id, user_id).await?;
        if self.database.delete_favorite(favorite_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Favorite {favorite_id}")))
        }
    }

    /// Delete the caller's favorite for `recipe_id`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the recipe is not one of the caller's favorites
    pub async fn remove_by_recipe(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        if self.database.delete_favorite_by_recipe(user_id, recipe_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "Favorite for recipe {recipe_id}"
            )))
        }
    }
}
