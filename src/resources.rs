// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Database, auth manager, configuration and the optional recipe generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::auth::{AuthManager, AuthResult};
use crate::config::ServerConfig;
use crate::database::repositories::RecipeRepositoryImpl;
use crate::database::Database;
use crate::errors::AppResult;
use crate::generation::RecipeGenerator;
use crate::services::favorites::FavoriteService;
use crate::services::profiles::ProfileService;
use crate::services::recipes::RecipeService;
use crate::services::users::UserService;

/// Everything a request handler may need, created once at startup
#[derive(Clone, Debug)]
pub struct ServerResources {
    /// Record store
    pub database: Database,
    /// Token issuing/validation and password hashing
    pub auth_manager: AuthManager,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// `None` when no Gemini API key is configured
    pub recipe_generator: Option<Arc<RecipeGenerator>>,
}

impl ServerResources {
    /// Build resources; the generator is derived from the Gemini configuration
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let recipe_generator = RecipeGenerator::from_config(&config.gemini)
            .ok()
            .map(Arc::new);
        Self {
            database,
            auth_manager: AuthManager::from_config(&config.auth),
            config,
            recipe_generator,
        }
    }

    /// Replace the recipe generator (tests inject stub clients here)
    #[must_use]
    pub fn with_recipe_generator(mut self, generator: Option<Arc<RecipeGenerator>>) -> Self {
        self.recipe_generator = generator;
        self
    }

    /// Recipe service bound to this database and generator
    #[must_use]
    pub fn recipe_service(&self) -> RecipeService {
        RecipeService::new(
            Arc::new(RecipeRepositoryImpl::new(self.database.clone())),
            self.recipe_generator.clone(),
        )
    }

    /// User account service
    #[must_use]
    pub fn user_service(&self) -> UserService {
        UserService::new(self.database.clone(), self.auth_manager.clone())
    }

    /// Profile service
    #[must_use]
    pub fn profile_service(&self) -> ProfileService {
        ProfileService::new(self.database.clone())
    }

    /// Favorite service
    #[must_use]
    pub fn favorite_service(&self) -> FavoriteService {
        FavoriteService::new(self.database.clone())
    }

    /// Authenticate a request from its `Authorization` header
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` without a bearer token, `AUTH_INVALID` or
    /// `AUTH_EXPIRED` for a bad one
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        self.auth_manager.authenticate(header)
    }
}
