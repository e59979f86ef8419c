// ABOUTME: Recipe entity and the ephemeral AI-generated recipe shape
// ABOUTME: Defines what is stored for a recipe and what the generator returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A persisted recipe owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Store-assigned identifier
    pub id: i64,
    /// Recipe title
    pub title: String,
    /// Ingredient list, one entry per line
    pub ingredients: String,
    /// Preparation steps, one step per line
    pub steps: String,
    /// Optional culinary style tag (e.g. "italiana", "vegana")
    pub style: Option<String>,
    /// Owning user; always taken from the authenticated caller
    pub user_id: i64,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// Recipe fields prior to insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    /// Recipe title
    pub title: String,
    /// Ingredient list
    pub ingredients: String,
    /// Preparation steps
    pub steps: String,
    /// Optional style tag
    pub style: Option<String>,
}

/// Flat recipe produced by the generation pipeline
///
/// All three fields are plain strings whatever shape the model answered
/// with; lists have already been rendered one item per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    /// Recipe title
    pub title: String,
    /// Ingredient list, newline separated
    pub ingredients: String,
    /// Numbered steps, newline separated
    pub steps: String,
}

impl GeneratedRecipe {
    /// Convert into an insertable draft carrying the requested style
    #[must_use]
    pub fn into_draft(self, style: Option<String>) -> RecipeDraft {
        RecipeDraft {
            title: self.title,
            ingredients: self.ingredients,
            steps: self.steps,
            style,
        }
    }
}
