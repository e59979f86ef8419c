// ABOUTME: Configuration module root
// ABOUTME: Environment-only configuration for the ChefGPT server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing into typed server configuration
pub mod environment;

pub use environment::{
    AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, GeminiConfig,
    GenerationAvailability, ServerConfig,
};
