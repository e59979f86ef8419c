// ABOUTME: AI recipe generation pipeline with typed-client and raw REST fallback
// ABOUTME: Tries every (strategy, model) candidate in order and returns the first usable recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Generation
//!
//! [`RecipeGenerator::generate`] runs two strategies in order:
//!
//! 1. **SDK**: the typed [`GeminiProvider`], once per configured model.
//! 2. **REST**: the raw API, once per (API version, model) pair. Models come
//!    from the list-models endpoint, or a fixed fallback list when listing
//!    fails or yields nothing.
//!
//! Each attempt is independent. An attempt succeeds only if the model answers
//! and the answer survives [`normalize`](normalize::normalize); the first
//! success ends the search. When both strategies are exhausted the caller gets
//! a single [`GenerationError::GenerationUnavailable`].

pub mod normalize;
pub mod prompt;

use std::fmt::{self, Display, Formatter};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::GeminiConfig;
use crate::constants::gemini::{
    API_KEY_HELP_URL, GENERATE_CONTENT_METHOD, MODEL_FAMILY, MODEL_NAME_PREFIX,
};
use crate::errors::{AppError, ErrorCode};
use crate::llm::{GeminiProvider, GeminiRestApi, GeminiRestClient, LlmProvider, RemoteModel};
use crate::logging::AppLogger;
use crate::models::GeneratedRecipe;

pub use normalize::{normalize, normalize_model_output, strip_code_fences, RecipeField};
pub use prompt::{build_recipe_prompt, frame_prompt};

// ============================================================================
// Errors
// ============================================================================

/// Upstream access method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Typed client behind [`LlmProvider`]
    Sdk,
    /// Raw HTTP calls through [`GeminiRestApi`]
    Rest,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sdk => write!(f, "sdk"),
            Self::Rest => write!(f, "rest"),
        }
    }
}

/// Failures of the generation pipeline
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// No API key; raised before any upstream call
    #[error("GEMINI_API_KEY is not configured. Create a key at {help_url}", help_url = API_KEY_HELP_URL)]
    ConfigurationMissing,

    /// One attempt, or a whole strategy, failed
    #[error("{strategy} strategy failed for {candidate}: {message}")]
    StrategyFailure {
        /// Strategy that failed
        strategy: Strategy,
        /// Model (and API version, for REST) that was tried
        candidate: String,
        /// Underlying error text
        message: String,
    },

    /// Model text was not JSON
    #[error("Model response is not valid JSON: {0}")]
    MalformedResponse(String),

    /// Every strategy and candidate failed
    #[error(
        "Gemini generation failed (SDK and REST both failed): {last_error}. Verify your API key at: {help_url}",
        help_url = API_KEY_HELP_URL
    )]
    GenerationUnavailable {
        /// Message of the last failed attempt
        last_error: String,
    },
}

impl GenerationError {
    fn strategy(strategy: Strategy, candidate: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StrategyFailure {
            strategy,
            candidate: candidate.into(),
            message: message.into(),
        }
    }

    /// Underlying message without the strategy/candidate prefix
    fn root_message(&self) -> String {
        match self {
            Self::StrategyFailure { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        let code = match &error {
            GenerationError::ConfigurationMissing => ErrorCode::ConfigMissing,
            GenerationError::GenerationUnavailable { .. } => ErrorCode::GenerationUnavailable,
            GenerationError::StrategyFailure { .. } | GenerationError::MalformedResponse(_) => {
                ErrorCode::InternalError
            }
        };
        Self::new(code, error.to_string())
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Candidate lists the generator walks through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Models tried by the SDK strategy, in order
    pub sdk_models: Vec<String>,
    /// REST models used when listing fails or is empty
    pub rest_fallback_models: Vec<String>,
    /// REST API versions, outer loop
    pub api_versions: Vec<String>,
}

impl From<&GeminiConfig> for GenerationSettings {
    fn from(config: &GeminiConfig) -> Self {
        Self {
            sdk_models: config.sdk_models.clone(),
            rest_fallback_models: config.rest_fallback_models.clone(),
            api_versions: config.api_versions.clone(),
        }
    }
}

/// Recipe generator over an optional typed client and a REST client
#[derive(Clone)]
pub struct RecipeGenerator {
    sdk: Option<Arc<dyn LlmProvider>>,
    rest: Arc<dyn GeminiRestApi>,
    settings: GenerationSettings,
}

impl RecipeGenerator {
    /// Assemble a generator from explicit clients
    ///
    /// `sdk: None` makes the SDK strategy fail immediately and fall through to REST.
    #[must_use]
    pub fn new(
        sdk: Option<Arc<dyn LlmProvider>>,
        rest: Arc<dyn GeminiRestApi>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            sdk,
            rest,
            settings,
        }
    }

    /// Build the production clients from configuration
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ConfigurationMissing`] if no API key is set.
    /// No client is constructed in that case.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or(GenerationError::ConfigurationMissing)?;

        let sdk: Option<Arc<dyn LlmProvider>> = config.sdk_enabled.then(|| {
            Arc::new(GeminiProvider::new(api_key).with_base_url(&config.base_url))
                as Arc<dyn LlmProvider>
        });
        let rest = Arc::new(GeminiRestClient::new(api_key).with_base_url(&config.base_url));

        Ok(Self::new(sdk, rest, GenerationSettings::from(config)))
    }

    /// Candidate settings in use
    #[must_use]
    pub const fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generate a recipe for `prompt`, falling back across strategies
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::GenerationUnavailable`] carrying the last
    /// underlying error once every candidate of both strategies has failed
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedRecipe, GenerationError> {
        let framed = frame_prompt(prompt);

        match self.run_sdk_strategy(&framed).await {
            Ok(recipe) => return Ok(recipe),
            Err(error) => warn!(error = %error, "SDK strategy exhausted, falling back to REST"),
        }

        match self.run_rest_strategy(&framed).await {
            Ok(recipe) => Ok(recipe),
            Err(error) => {
                warn!(error = %error, "REST strategy exhausted");
                Err(GenerationError::GenerationUnavailable {
                    last_error: error.root_message(),
                })
            }
        }
    }

    async fn run_sdk_strategy(&self, prompt: &str) -> Result<GeneratedRecipe, GenerationError> {
        let Some(provider) = self.sdk.as_deref() else {
            return Err(GenerationError::strategy(
                Strategy::Sdk,
                "client",
                "typed Gemini client is disabled",
            ));
        };

        first_success(Strategy::Sdk, self.settings.sdk_models.iter(), |model| {
            Self::attempt_sdk(provider, model, prompt)
        })
        .await
    }

    async fn attempt_sdk(
        provider: &dyn LlmProvider,
        model: &str,
        prompt: &str,
    ) -> Result<GeneratedRecipe, GenerationError> {
        let started = Instant::now();
        let outcome = match provider.generate_text(model, prompt).await {
            Ok(text) => normalize_model_output(&text).map_err(|e| e.to_string()),
            Err(error) => Err(error.message),
        }
        .map_err(|message| GenerationError::strategy(Strategy::Sdk, model, message));

        log_attempt(Strategy::Sdk, model, started, &outcome);
        outcome
    }

    async fn run_rest_strategy(&self, prompt: &str) -> Result<GeneratedRecipe, GenerationError> {
        let models = self.discover_rest_models().await;
        let candidates = rest_candidates(&self.settings.api_versions, &models);

        first_success(Strategy::Rest, candidates, |(version, model)| async move {
            self.attempt_rest(&version, &model, prompt).await
        })
        .await
    }

    async fn attempt_rest(
        &self,
        api_version: &str,
        model: &str,
        prompt: &str,
    ) -> Result<GeneratedRecipe, GenerationError> {
        let started = Instant::now();
        let candidate = format!("{api_version}/{model}");

        let outcome = match self.rest.generate_content(api_version, model, prompt).await {
            Ok(Some(text)) => normalize_model_output(&text).map_err(|e| e.to_string()),
            Ok(None) => Err("response contained no text".to_owned()),
            Err(error) => Err(error.message),
        }
        .map_err(|message| GenerationError::strategy(Strategy::Rest, candidate.as_str(), message));

        log_attempt(Strategy::Rest, &candidate, started, &outcome);
        outcome
    }

    /// Listed `generateContent` models, or the fallback list
    async fn discover_rest_models(&self) -> Vec<String> {
        match self.rest.list_models().await {
            Ok(models) => {
                let candidates = filter_candidate_models(&models);
                if candidates.is_empty() {
                    warn!("Model listing returned no usable Gemini models, using fallback list");
                    fallback_models(&self.settings.rest_fallback_models)
                } else {
                    info!(count = candidates.len(), "Using listed Gemini models");
                    candidates
                }
            }
            Err(error) => {
                warn!(error = %error, "Model listing failed, using fallback list");
                fallback_models(&self.settings.rest_fallback_models)
            }
        }
    }
}

impl fmt::Debug for RecipeGenerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeGenerator")
            .field("sdk_enabled", &self.sdk.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Drop the `models/` prefix the listing endpoint adds
#[must_use]
pub fn clean_model_name(name: &str) -> &str {
    name.strip_prefix(MODEL_NAME_PREFIX).unwrap_or(name)
}

/// Keep Gemini-family models that support `generateContent`, prefix removed
#[must_use]
pub fn filter_candidate_models(models: &[RemoteModel]) -> Vec<String> {
    models
        .iter()
        .filter(|model| {
            model
                .supported_generation_methods
                .iter()
                .any(|method| method == GENERATE_CONTENT_METHOD)
        })
        .map(|model| clean_model_name(&model.name))
        .filter(|name| name.contains(MODEL_FAMILY))
        .map(str::to_owned)
        .collect()
}

/// Fallback list with prefixes removed and duplicates dropped, order kept
fn fallback_models(models: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(models.len());
    for name in models.iter().map(|model| clean_model_name(model)) {
        if !unique.iter().any(|seen| seen == name) {
            unique.push(name.to_owned());
        }
    }
    unique
}

/// (API version, model) pairs, version outer and model inner
fn rest_candidates(api_versions: &[String], models: &[String]) -> Vec<(String, String)> {
    api_versions
        .iter()
        .flat_map(|version| {
            models
                .iter()
                .map(move |model| (version.clone(), model.clone()))
        })
        .collect()
}

/// Run `attempt` over `candidates` in order and stop at the first success
///
/// Candidates after the first success are never attempted.
async fn first_success<I, F, Fut>(
    strategy: Strategy,
    candidates: I,
    mut attempt: F,
) -> Result<GeneratedRecipe, GenerationError>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<GeneratedRecipe, GenerationError>>,
{
    let mut last_error = None;
    for candidate in candidates {
        match attempt(candidate).await {
            Ok(recipe) => return Ok(recipe),
            Err(error) => last_error = Some(error),
        }
    }
    Err(last_error
        .unwrap_or_else(|| GenerationError::strategy(strategy, "none", "no candidate models")))
}

fn log_attempt(
    strategy: Strategy,
    candidate: &str,
    started: Instant,
    outcome: &Result<GeneratedRecipe, GenerationError>,
) {
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let error = outcome.as_ref().err().map(GenerationError::root_message);
    AppLogger::log_generation_attempt(
        &strategy.to_string(),
        candidate,
        outcome.is_ok(),
        duration_ms,
        error.as_deref(),
    );
}
