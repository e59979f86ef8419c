// ABOUTME: Core types for the ChefGPT recipe API
// ABOUTME: Foundation crate with error handling and persisted data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # ChefGPT Core
//!
//! Foundation crate providing the shared types of the ChefGPT server. It
//! changes rarely, which keeps incremental builds of the server crate fast.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Users, profiles, recipes and favorites as stored and served

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Core data models (User, Profile, Recipe, Favorite, `GeneratedRecipe`)
pub mod models;
