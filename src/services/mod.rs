// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Keeps validation, ownership rules and the generation flow out of the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers parse requests and authenticate; services own the rules.

/// Favorites of the calling user
pub mod favorites;

/// Profile reads and owner-only edits
pub mod profiles;

/// Recipe CRUD and AI generation
pub mod recipes;

/// Account validation, login checks and self-only edits
pub mod users;
