// ABOUTME: Main library entry point for the ChefGPT recipe API
// ABOUTME: Provides the REST API, persistence and the Gemini recipe generation pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # ChefGPT Server
//!
//! Backend for a recipe application: users, profiles, recipes and favorites
//! over a `SQLite` store, plus AI recipe generation from a list of
//! ingredients using Google Gemini.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers per domain ([`routes`])
//! - **Services**: ownership rules and the generation flow ([`services`])
//! - **Generation**: prompt, fallback across Gemini access methods and response
//!   normalization ([`generation`])
//! - **LLM**: Gemini clients behind traits ([`llm`])
//! - **Database**: `sqlx` `SQLite` store ([`database`])
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chefgpt_server::config::ServerConfig;
//! use chefgpt_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("ChefGPT configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuing/validation and password hashing
pub mod auth;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// Unified error handling
pub mod errors;

/// AI recipe generation pipeline
pub mod generation;

/// Gemini clients
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Data models
pub mod models;

/// Shared server state
pub mod resources;

/// HTTP routes
pub mod routes;

/// Server assembly
pub mod server;

/// Domain services
pub mod services;
