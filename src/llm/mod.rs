// ABOUTME: Gemini client layer used by the recipe generation pipeline
// ABOUTME: Defines the generation contract the typed Gemini client implements, plus the raw REST client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Clients
//!
//! Two ways of reaching Gemini live here:
//!
//! - [`GeminiProvider`]: a typed client implementing [`LlmProvider`]. The
//!   model is chosen per call.
//! - [`GeminiRestClient`]: a thin client over the raw HTTP API implementing
//!   [`GeminiRestApi`], which exposes model listing and lets the caller pick
//!   the API version per call.
//!
//! Both are trait objects so the recipe generator can be exercised with stubs.

mod gemini;
mod gemini_rest;

pub use gemini::GeminiProvider;
pub use gemini_rest::{GeminiRestApi, GeminiRestClient, RemoteModel};

use async_trait::async_trait;

use crate::errors::AppResult;

/// Typed text generation against a named model
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send `prompt` as a single user turn to `model` and return the answer text
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success statuses and
    /// answers without text.
    async fn generate_text(&self, model: &str, prompt: &str) -> AppResult<String>;
}
