// ABOUTME: Recipe business logic: owner-scoped CRUD and AI generation with optional auto-save
// ABOUTME: Sits between the HTTP routes and the recipe repository / generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::repositories::RecipeRepository;
use crate::database::RecipePatch;
use crate::errors::{AppError, AppResult};
use crate::generation::{build_recipe_prompt, GenerationError, RecipeGenerator};
use crate::models::{GeneratedRecipe, Recipe, RecipeDraft};

/// Body of `POST /recipes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecipeRequest {
    /// Recipe title
    #[serde(default)]
    pub title: String,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: String,
    /// Preparation steps
    #[serde(default)]
    pub steps: String,
    /// Optional style tag
    pub style: Option<String>,
}

/// Body of `PATCH /recipes/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    /// New title
    pub title: Option<String>,
    /// New ingredient list
    pub ingredients: Option<String>,
    /// New steps
    pub steps: Option<String>,
    /// New style tag
    pub style: Option<String>,
}

const fn default_auto_save() -> bool {
    true
}

/// Body of `POST /recipes/ai`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    /// Free-form ingredient text
    #[serde(default)]
    pub ingredients: String,
    /// Optional culinary style
    pub style: Option<String>,
    /// Persist the generated recipe for the caller
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
}

/// Result of a generation request
///
/// Serialized untagged: a saved recipe carries `id`, a draft does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenerationOutcome {
    /// Persisted for the caller
    Saved(Recipe),
    /// Returned without persisting
    Draft(GeneratedRecipe),
}

/// Owner-scoped recipe operations
#[derive(Clone)]
pub struct RecipeService {
    repository: Arc<dyn RecipeRepository>,
    generator: Option<Arc<RecipeGenerator>>,
}

impl RecipeService {
    /// Create a service; `generator: None` means AI generation is unconfigured
    #[must_use]
    pub fn new(
        repository: Arc<dyn RecipeRepository>,
        generator: Option<Arc<RecipeGenerator>>,
    ) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Create a recipe owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for a blank title, ingredients or steps
    pub async fn create(&self, owner_id: i64, request: CreateRecipeRequest) -> AppResult<Recipe> {
        require_text("title", &request.title)?;
        require_text("ingredients", &request.ingredients)?;
        require_text("steps", &request.steps)?;

        let draft = RecipeDraft {
            title: request.title,
            ingredients: request.ingredients,
            steps: request.steps,
            style: non_blank(request.style),
        };
        self.repository.save(owner_id, &draft).await
    }

    /// The caller's recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn list(&self, owner_id: i64) -> AppResult<Vec<Recipe>> {
        self.repository.find_by_owner(owner_id).await
    }

    /// One of the caller's recipes
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the recipe is missing or owned by someone else
    pub async fn find_one(&self, recipe_id: i64, owner_id: i64) -> AppResult<Recipe> {
        self.repository
            .find_by_id(recipe_id)
            .await?
            .filter(|recipe| recipe.user_id == owner_id)
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
    }

    /// Partially update one of the caller's recipes
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` under the same rule as [`Self::find_one`],
    /// or `MISSING_REQUIRED_FIELD` if a provided title, ingredients or steps is blank
    pub async fn update(
        &self,
        recipe_id: i64,
        owner_id: i64,
        request: UpdateRecipeRequest,
    ) -> AppResult<Recipe> {
        for (field, value) in [
            ("title", &request.title),
            ("ingredients", &request.ingredients),
            ("steps", &request.steps),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }

        self.find_one(recipe_id, owner_id).await?;

        let patch = RecipePatch {
            title: request.title,
            ingredients: request.ingredients,
            steps: request.steps,
            style: request.style,
        };
        self.repository
            .update(recipe_id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
    }

    /// Delete one of the caller's recipes
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` under the same rule as [`Self::find_one`]
    pub async fn remove(&self, recipe_id: i64, owner_id: i64) -> AppResult<()> {
        self.find_one(recipe_id, owner_id).await?;
        if self.repository.delete(recipe_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Recipe {recipe_id}")))
        }
    }

    /// Generate a recipe from ingredients and optionally save it for `owner_id`
    ///
    /// # Errors
    ///
    /// - `MISSING_REQUIRED_FIELD` for blank ingredients
    /// - `CONFIG_MISSING` (503) when no API key is configured, before any upstream call
    /// - `GENERATION_UNAVAILABLE` (500) when every strategy failed
    pub async fn generate(
        &self,
        owner_id: i64,
        request: GenerateRecipeRequest,
    ) -> AppResult<GenerationOutcome> {
        require_text("ingredients", &request.ingredients)?;
        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerationError::ConfigurationMissing)?;

        let style = non_blank(request.style);
        let prompt = build_recipe_prompt(&request.ingredients, style.as_deref());
        let generated = generator.generate(&prompt).await?;

        if !request.auto_save {
            return Ok(GenerationOutcome::Draft(generated));
        }

        let saved = self
            .repository
            .save(owner_id, &generated.into_draft(style))
            .await?;
        info!(recipe_id = saved.id, user_id = owner_id, "Saved generated recipe");
        Ok(GenerationOutcome::Saved(saved))
    }
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::missing_field(field))
    } else {
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
