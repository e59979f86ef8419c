// ABOUTME: Recipe route handlers including AI generation
// ABOUTME: Every endpoint is scoped to the authenticated caller's recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! `POST /recipes/ai` answers `201` with either the stored recipe (auto-save,
//! the default) or the bare `{title, ingredients, steps}` draft.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::recipes::{CreateRecipeRequest, GenerateRecipeRequest, UpdateRecipeRequest};

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipes", get(Self::handle_list).post(Self::handle_create))
            .route("/recipes/ai", post(Self::handle_generate))
            .route(
                "/recipes/:id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let recipes = resources.recipe_service().list(auth.user_id).await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle POST /recipes
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let recipe = resources
            .recipe_service()
            .create(auth.user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle POST /recipes/ai
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<GenerateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        info!(
            user_id = auth.user_id,
            auto_save = request.auto_save,
            "Recipe generation requested"
        );
        let outcome = resources
            .recipe_service()
            .generate(auth.user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(outcome)).into_response())
    }

    /// Handle GET /recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let recipe = resources
            .recipe_service()
            .find_one(recipe_id, auth.user_id)
            .await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle PATCH /recipes/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
        Json(request): Json<UpdateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let recipe = resources
            .recipe_service()
            .update(recipe_id, auth.user_id, request)
            .await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle DELETE /recipes/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .recipe_service()
            .remove(recipe_id, auth.user_id)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
