// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Issues HS256 bearer tokens after account creation or a credential check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! `POST /auth/register` and `POST /auth/login` both answer with
//! `{access_token, user: {id, email, name}}`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{User, UserSummary};
use crate::resources::ServerResources;
use crate::services::users::{normalize_email, RegisterRequest};

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Token plus identity returned by register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header
    pub access_token: String,
    /// Authenticated user
    pub user: UserSummary,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    fn auth_response(resources: &ServerResources, user: &User) -> AppResult<AuthResponse> {
        Ok(AuthResponse {
            access_token: resources.auth_manager.generate_token(user)?,
            user: user.summary(),
        })
    }

    /// Handle POST /auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let email = normalize_email(&request.email);
        let user = match resources.user_service().create(request).await {
            Ok(user) => user,
            Err(error) => {
                AppLogger::log_auth_event(&email, "register", false, Some(&error.message));
                return Err(error);
            }
        };

        AppLogger::log_auth_event(&user.email, "register", true, None);
        let response = Self::auth_response(&resources, &user)?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let user = resources
            .user_service()
            .verify_credentials(&request.email, &request.password)
            .await?;

        AppLogger::log_auth_event(&user.email, "login", true, None);
        let response = Self::auth_response(&resources, &user)?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
