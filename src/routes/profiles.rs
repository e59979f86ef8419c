// ABOUTME: Profile route handlers
// ABOUTME: Public reads, owner-only updates and deletes
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
use crate::services::profiles::UpdateProfileRequest;

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/profiles", get(Self::handle_list))
            .route(
                "/profiles/:id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/profiles/user/:user_id", get(Self::handle_get_by_user))
            .with_state(resources)
    }

    /// Handle GET /profiles
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let profiles = resources.profile_service().list().await?;
        Ok((StatusCode::OK, Json(profiles)).into_response())
    }

    /// Handle GET /profiles/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(profile_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let profile = resources.profile_service().get(profile_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle GET /profiles/user/:user_id
    async fn handle_get_by_user(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let profile = resources.profile_service().get_by_user(user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PATCH /profiles/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(profile_id): Path<i64>,
        Json(request): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        let profile = resources
            .profile_service()
            .update(profile_id, auth.user_id, &request)
            .await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle DELETE /profiles/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(profile_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = resources.authenticate(&headers)?;
        resources
            .profile_service()
            .remove(profile_id, auth.user_id)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
