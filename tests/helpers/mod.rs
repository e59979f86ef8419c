// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request driver, API fixtures and scripted Gemini clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code, missing_docs, clippy::must_use_candidate, clippy::new_without_default)]

pub mod api_client;
pub mod axum_test;
pub mod stub_gemini;
