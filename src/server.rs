// ABOUTME: HTTP server assembly: merges domain routers and applies middleware layers
// ABOUTME: Binds the listener and serves until ctrl-c with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::middleware::{propagate_request_id_layer, set_request_id_layer, setup_cors, trace_layer};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, FavoriteRoutes, HealthRoutes, ProfileRoutes, RecipeRoutes, UserRoutes,
};

/// The ChefGPT HTTP server
#[derive(Clone, Debug)]
pub struct ChefGptServer {
    resources: Arc<ServerResources>,
}

impl ChefGptServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Shared resources
    #[must_use]
    pub const fn resources(&self) -> &Arc<ServerResources> {
        &self.resources
    }

    /// Full application router with middleware applied
    ///
    /// Layers run outermost first: request id assignment, tracing, CORS,
    /// then the handler; the request id is copied onto every response.
    #[must_use]
    pub fn router(&self) -> Router {
        let resources = Arc::clone(&self.resources);

        Router::new()
            .merge(HealthRoutes::routes(Arc::clone(&resources)))
            .merge(AuthRoutes::routes(Arc::clone(&resources)))
            .merge(UserRoutes::routes(Arc::clone(&resources)))
            .merge(ProfileRoutes::routes(Arc::clone(&resources)))
            .merge(RecipeRoutes::routes(Arc::clone(&resources)))
            .merge(FavoriteRoutes::routes(Arc::clone(&resources)))
            .layer(setup_cors(&resources.config.cors))
            .layer(propagate_request_id_layer())
            .layer(trace_layer())
            .layer(set_request_id_layer())
    }

    /// Bind to the configured host and port and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, binding fails or the server fails
    pub async fn run(&self) -> Result<()> {
        let config = &self.resources.config;
        let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", config.host, config.http_port))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("HTTP server listening on http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
