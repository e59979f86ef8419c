// ABOUTME: Data models served and stored by the server
// ABOUTME: Re-exports the entity types from chefgpt-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use chefgpt_core::models::{
    Favorite, GeneratedRecipe, Profile, Recipe, RecipeDraft, User, UserSummary,
};
