// ABOUTME: User account route handlers
// ABOUTME: Listing and lookup for any authenticated caller, writes restricted to the account owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::users::{RegisterRequest, UpdateUserRequest};

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/users/:id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /users
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.authenticate(&headers)?;
        let users = resources.user_service().list().await?;
        Ok((StatusCode::OK, Json(users)).into_response())
    }

    /// Handle POST /users
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.user_service().create(request).await?;
        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /users/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(user_id): Path<i64>,
    ) -> Result<Response, AppError> {
        resources.authenticate(&headers)?;
        let user = resources.user_service().get(user_id).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle PATCH /users/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(user_id): Path<i64>,
        Json(request): Json<UpdateUserRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let user = resources
            .user_service()
            .update(user_id, auth.user_id, request)
            .await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle DELETE /users/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(user_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .user_service()
            .remove(user_id, auth.user_id)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
