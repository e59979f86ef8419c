// ABOUTME: Core data models for the ChefGPT recipe API
// ABOUTME: Re-exports user, profile, recipe and favorite types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Entities are serialized with camelCase field names (`userId`, `createdAt`)
//! so the JSON surface stays compatible with existing web clients. Timestamps
//! are RFC 3339 strings, exactly as stored.

mod favorite;
mod recipe;
mod user;

pub use favorite::Favorite;
pub use recipe::{GeneratedRecipe, Recipe, RecipeDraft};
pub use user::{Profile, User, UserSummary};
