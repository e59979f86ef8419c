// ABOUTME: Raw REST client for the Gemini Generative Language API
// ABOUTME: Lists models and calls generateContent against an explicit API version
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::constants::gemini::{API_BASE_URL, GENERATE_CONTENT_METHOD, PRIMARY_API_VERSION};
use crate::errors::{AppError, AppResult};

/// Longest slice of an upstream error body kept in our error message
const ERROR_BODY_PREVIEW: usize = 300;

/// A model entry returned by the list-models endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteModel {
    /// Fully qualified name, e.g. `models/gemini-1.5-flash`
    pub name: String,
    /// Methods this model accepts, e.g. `generateContent`
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl RemoteModel {
    /// Convenience constructor
    #[must_use]
    pub fn new(name: impl Into<String>, methods: &[&str]) -> Self {
        Self {
            name: name.into(),
            supported_generation_methods: methods.iter().map(|m| (*m).to_owned()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<RemoteModel>,
}

/// Raw HTTP surface of Gemini used by the REST generation strategy
#[async_trait]
pub trait GeminiRestApi: Send + Sync {
    /// List the models visible to the configured key
    async fn list_models(&self) -> AppResult<Vec<RemoteModel>>;

    /// Call `generateContent` and return the first candidate's text
    ///
    /// `Ok(None)` means the call succeeded but carried no text.
    async fn generate_content(
        &self,
        api_version: &str,
        model: &str,
        prompt: &str,
    ) -> AppResult<Option<String>>;
}

/// `reqwest` implementation of [`GeminiRestApi`]
#[derive(Clone)]
pub struct GeminiRestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiRestClient {
    /// Create a client against the public API host
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: API_BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different API host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn generate_url(&self, api_version: &str, model: &str) -> String {
        format!(
            "{}/{api_version}/models/{model}:{GENERATE_CONTENT_METHOD}",
            self.base_url
        )
    }

    fn list_url(&self) -> String {
        format!("{}/{PRIMARY_API_VERSION}/models", self.base_url)
    }

    fn upstream_error(context: &str, status: StatusCode, body: &str) -> AppError {
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
        AppError::external_service("Gemini REST", format!("{context} returned {status}: {preview}"))
    }

    /// Pull `candidates[0].content.parts[0].text` out of a response body
    fn first_candidate_text(body: &Value) -> Option<String> {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    }
}

#[async_trait]
impl GeminiRestApi for GeminiRestClient {
    #[instrument(skip(self))]
    async fn list_models(&self) -> AppResult<Vec<RemoteModel>> {
        let response = self
            .client
            .get(self.list_url())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::external_service("Gemini REST", format!("list models: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::external_service("Gemini REST", format!("list models: {e}")))?;

        if !status.is_success() {
            return Err(Self::upstream_error("list models", status, &text));
        }

        let parsed: ListModelsResponse = serde_json::from_str(&text)?;
        debug!(count = parsed.models.len(), "Listed Gemini models");
        Ok(parsed.models)
    }

    #[instrument(skip(self, prompt))]
    async fn generate_content(
        &self,
        api_version: &str,
        model: &str,
        prompt: &str,
    ) -> AppResult<Option<String>> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let context = format!("{api_version}/{model}");

        let response = self
            .client
            .post(self.generate_url(api_version, model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external_service("Gemini REST", format!("{context}: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::external_service("Gemini REST", format!("{context}: {e}")))?;

        if !status.is_success() {
            return Err(Self::upstream_error(&context, status, &text));
        }

        let value: Value = serde_json::from_str(&text)?;
        Ok(Self::first_candidate_text(&value))
    }
}

impl Debug for GeminiRestClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiRestClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
