// ABOUTME: Favorite model linking a user to a recipe
// ABOUTME: Unique per (user, recipe) pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::Recipe;

/// A recipe bookmarked by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Store-assigned identifier
    pub id: i64,
    /// User who saved the favorite
    pub user_id: i64,
    /// Favorited recipe
    pub recipe_id: i64,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// The favorited recipe, when joined
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recipe: Option<Recipe>,
}
