// ABOUTME: Favorite route handlers
// ABOUTME: Callers can only see and remove their own favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Body of `POST /favorites`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    /// Recipe to mark as favorite
    pub recipe_id: i64,
}

/// Favorite routes handler
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create all favorite routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/favorites", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/favorites/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .route(
                "/favorites/recipe/:recipe_id",
                delete(Self::handle_delete_by_recipe),
            )
            .with_state(resources)
    }

    /// Handle POST /favorites
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateFavoriteRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let favorite = resources
            .favorite_service()
            .add(auth.user_id, request.recipe_id)
            .await?;
        Ok((StatusCode::CREATED, Json(favorite)).into_response())
    }

    /// Handle GET /favorites
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let favorites = resources.favorite_service().list(auth.user_id).await?;
        Ok((StatusCode::OK, Json(favorites)).into_response())
    }

    /// Handle GET /favorites/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(favorite_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let favorite = resources
            .favorite_service()
            .find_one(favorite_id, auth.user_id)
            .await?;
        Ok((StatusCode::OK, Json(favorite)).into_response())
    }

    /// Handle DELETE /favorites/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(favorite_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .favorite_service()
            .remove(favorite_id, auth.user_id)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle DELETE /favorites/recipe/:recipe_id
    async fn handle_delete_by_recipe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .favorite_service()
            .remove_by_recipe(auth.user_id, recipe_id)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
