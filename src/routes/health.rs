// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Reports database reachability and whether AI generation is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `GET /health` always answers `200`; a degraded database is reported in the
//! body so load balancers and humans see the same document.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::GenerationAvailability;
use crate::constants::service_names;
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let database = match resources.database.ping().await {
            Ok(()) => "ok",
            Err(error) => {
                warn!(error = %error, "Health check database ping failed");
                "unavailable"
            }
        };
        let ai_generation = if resources.recipe_generator.is_some() {
            GenerationAvailability::Ready
        } else {
            GenerationAvailability::Unconfigured
        };
        let status = if database == "ok" { "healthy" } else { "degraded" };

        Json(json!({
            "status": status,
            "service": service_names::CHEFGPT_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
            "ai_generation": ai_generation,
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }
}
