// ABOUTME: Route module organization for the ChefGPT HTTP API
// ABOUTME: Provides route definitions organized by domain with thin handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the ChefGPT server
//!
//! Each domain module exposes a `XRoutes::routes(resources)` constructor.
//! Handlers authenticate, parse and delegate; business rules live in
//! [`crate::services`].

/// Registration and login
pub mod auth;
/// Favorite recipes
pub mod favorites;
/// Health check and system status routes
pub mod health;
/// User profiles
pub mod profiles;
/// Recipe CRUD and AI generation
pub mod recipes;
/// User accounts
pub mod users;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Favorite route handlers
pub use favorites::FavoriteRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Profile route handlers
pub use profiles::ProfileRoutes;
/// Recipe route handlers
pub use recipes::RecipeRoutes;
/// User route handlers
pub use users::UserRoutes;
