// ABOUTME: Error types for the server crate
// ABOUTME: Re-exports the unified error system from chefgpt-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling, shared with `chefgpt-core`

pub use chefgpt_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails};
