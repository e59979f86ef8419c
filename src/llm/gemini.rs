// ABOUTME: Typed Gemini client over the Generative Language API
// ABOUTME: Sends a single user turn to a chosen model and extracts the answer text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! The API key comes from `GEMINI_API_KEY` (see
//! [`GeminiConfig`](crate::config::GeminiConfig)). Keys can be created at
//! <https://aistudio.google.com/app/apikey>.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chefgpt_server::llm::{GeminiProvider, LlmProvider};
//! use chefgpt_server::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::new("my-api-key");
//!     let text = provider
//!         .generate_text("gemini-1.5-flash", "Suggest a soup")
//!         .await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::LlmProvider;
use crate::constants::gemini::{API_BASE_URL, GENERATE_CONTENT_METHOD, PRIMARY_API_VERSION};
use crate::errors::{AppError, AppResult};

/// Role Gemini expects on end-user turns
const USER_ROLE: &str = "user";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// Non-text parts (function calls, inline data) deserialize with `text: None`
#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_owned(),
            client: Client::new(),
        }
    }

    /// Point the provider at a different API host (proxies, local mocks)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Build the API URL for a model; the key travels as a query parameter
    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/{PRIMARY_API_VERSION}/models/{model}:{GENERATE_CONTENT_METHOD}",
            self.base_url
        )
    }

    fn build_request(prompt: &str) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: [RequestContent {
                role: USER_ROLE,
                parts: [TextPart { text: prompt }],
            }],
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> AppResult<String> {
        let content = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .ok_or_else(|| AppError::external_service("Gemini", "No content in response"))?;

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(AppError::external_service(
                "Gemini",
                "Response contained no text parts",
            ));
        }
        Ok(text)
    }

    /// Prefer the API's own error message over the raw body
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        AppError::external_service("Gemini", format!("API error ({status}): {message}"))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    #[instrument(skip(self, prompt))]
    async fn generate_text(&self, model: &str, prompt: &str) -> AppResult<String> {
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| AppError::external_service("Gemini", format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::external_service("Gemini", format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service("Gemini", format!("Failed to parse response: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(
                "Gemini",
                format!("API error: {}", error.message),
            ));
        }

        Self::extract_content(&gemini_response)
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_uses_primary_version() {
        let provider = GeminiProvider::new("k").with_base_url("http://localhost:9999/");
        assert_eq!(
            provider.build_url("gemini-1.5-flash"),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_is_single_user_turn() {
        let body = serde_json::to_value(GeminiProvider::build_request("hola")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents":[{"role":"user","parts":[{"text":"hola"}]}]})
        );
    }

    #[test]
    fn test_extract_content_joins_text_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\":"},{"functionCall":{"name":"x"}},{"text":"\"A\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiProvider::extract_content(&response).unwrap(),
            r#"{"title":"A"}"#
        );
    }

    #[test]
    fn test_extract_content_without_candidates_fails() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(GeminiProvider::extract_content(&response).is_err());
    }

    #[test]
    fn test_api_error_prefers_upstream_message() {
        let body = r#"{"error":{"message":"API key not valid"}}"#;
        let err = GeminiProvider::map_api_error(400, body);
        assert!(err.message.contains("API error (400): API key not valid"));

        let raw = GeminiProvider::map_api_error(404, "model not found");
        assert!(raw.message.contains("404"));
        assert!(raw.message.contains("model not found"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", GeminiProvider::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
