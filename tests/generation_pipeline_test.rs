// ABOUTME: Tests for the SDK then REST recipe generation fallback
// ABOUTME: Uses recording stub clients to verify attempt order and early exit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use chefgpt_server::config::GeminiConfig;
use chefgpt_server::errors::{AppError, ErrorCode};
use chefgpt_server::generation::{GenerationError, RecipeGenerator};
use chefgpt_server::llm::RemoteModel;
use helpers::stub_gemini::{generator_with, Reply, StubProvider, StubRest, GOOD_RECIPE_JSON};

#[tokio::test]
async fn test_first_sdk_success_stops_search() {
    common::init_test_logging();
    let sdk = Arc::new(StubProvider::new().reply("gemini-2.5-flash", Reply::text(GOOD_RECIPE_JSON)));
    let rest = Arc::new(StubRest::new());
    let generator = generator_with(Some(Arc::clone(&sdk)), Arc::clone(&rest));

    let recipe = generator.generate("receta").await.unwrap();

    assert_eq!(recipe.title, "Tortilla");
    assert_eq!(recipe.ingredients, "4 huevos\n2 patatas");
    assert_eq!(recipe.steps, "1. Batir\n2. Cuajar");
    assert_eq!(sdk.calls(), vec!["gemini-2.5-flash"]);
    assert!(rest.calls().is_empty());
    assert_eq!(rest.list_calls(), 0);
}

#[tokio::test]
async fn test_sdk_models_tried_in_order_until_success() {
    let sdk = Arc::new(
        StubProvider::new()
            .reply("gemini-2.5-flash", Reply::fail("model not found"))
            .reply("gemini-1.5-flash", Reply::text("no es json"))
            .reply(
                "gemini-1.5-pro",
                Reply::text(&format!("```json\n{GOOD_RECIPE_JSON}\n```")),
            )
            .reply("gemini-pro", Reply::text(GOOD_RECIPE_JSON)),
    );
    let rest = Arc::new(StubRest::new());
    let generator = generator_with(Some(Arc::clone(&sdk)), Arc::clone(&rest));

    let recipe = generator.generate("receta").await.unwrap();

    assert_eq!(recipe.title, "Tortilla");
    assert_eq!(
        sdk.calls(),
        vec!["gemini-2.5-flash", "gemini-1.5-flash", "gemini-1.5-pro"]
    );
    assert!(rest.calls().is_empty());
}

#[tokio::test]
async fn test_falls_back_to_rest_with_fallback_models_when_listing_fails() {
    let sdk = Arc::new(StubProvider::new());
    let rest = Arc::new(
        StubRest::new().reply("v1beta", "gemini-1.5-pro", Reply::text(GOOD_RECIPE_JSON)),
    );
    let generator = generator_with(Some(Arc::clone(&sdk)), Arc::clone(&rest));

    let recipe = generator.generate("receta").await.unwrap();

    assert_eq!(recipe.title, "Tortilla");
    assert_eq!(sdk.calls().len(), 4);
    assert_eq!(rest.list_calls(), 1);
    assert_eq!(
        rest.calls(),
        vec!["v1beta/gemini-1.5-flash", "v1beta/gemini-1.5-pro"]
    );
}

#[tokio::test]
async fn test_rest_uses_filtered_listing() {
    let rest = Arc::new(
        StubRest::new()
            .listing(vec![
                RemoteModel::new("models/embedding-001", &["embedContent"]),
                RemoteModel::new("models/gemini-2.0-flash", &["generateContent", "countTokens"]),
                RemoteModel::new("models/gemini-embedding-exp", &["embedContent"]),
                RemoteModel::new("models/aqa", &["generateAnswer"]),
            ])
            .reply("v1", "gemini-2.0-flash", Reply::text(GOOD_RECIPE_JSON)),
    );
    let generator = generator_with(None, Arc::clone(&rest));

    let recipe = generator.generate("receta").await.unwrap();

    assert_eq!(recipe.title, "Tortilla");
    assert_eq!(
        rest.calls(),
        vec!["v1beta/gemini-2.0-flash", "v1/gemini-2.0-flash"]
    );
}

#[tokio::test]
async fn test_empty_listing_uses_fallback_models() {
    let rest = Arc::new(
        StubRest::new()
            .listing(vec![RemoteModel::new("models/embedding-001", &["embedContent"])])
            .reply("v1beta", "gemini-1.5-flash", Reply::text(GOOD_RECIPE_JSON)),
    );
    let generator = generator_with(None, Arc::clone(&rest));

    generator.generate("receta").await.unwrap();

    assert_eq!(rest.calls(), vec!["v1beta/gemini-1.5-flash"]);
}

#[tokio::test]
async fn test_rest_iterates_versions_outer_models_inner() {
    let rest = Arc::new(
        StubRest::new()
            .reply("v1beta", "gemini-1.5-flash", Reply::Empty)
            .reply("v1beta", "gemini-1.5-pro", Reply::text("```\nnot json\n```"))
            .reply("v1", "gemini-1.5-flash", Reply::text(GOOD_RECIPE_JSON)),
    );
    let generator = generator_with(None, Arc::clone(&rest));

    generator.generate("receta").await.unwrap();

    assert_eq!(
        rest.calls(),
        vec![
            "v1beta/gemini-1.5-flash",
            "v1beta/gemini-1.5-pro",
            "v1beta/gemini-pro",
            "v1/gemini-1.5-flash",
        ]
    );
}

#[tokio::test]
async fn test_disabled_sdk_goes_straight_to_rest() {
    let rest = Arc::new(
        StubRest::new().reply("v1beta", "gemini-1.5-flash", Reply::text(GOOD_RECIPE_JSON)),
    );
    let generator = generator_with(None, Arc::clone(&rest));

    let recipe = generator.generate("receta").await.unwrap();

    assert_eq!(recipe.steps, "1. Batir\n2. Cuajar");
    assert_eq!(rest.calls().len(), 1);
}

#[tokio::test]
async fn test_all_failures_surface_single_unavailable_error() {
    let sdk = Arc::new(StubProvider::new());
    let rest = Arc::new(StubRest::new());
    let generator = generator_with(Some(Arc::clone(&sdk)), Arc::clone(&rest));

    let error = generator.generate("receta").await.unwrap_err();

    match &error {
        GenerationError::GenerationUnavailable { last_error } => {
            assert_eq!(last_error, "stub: 404 for v1/gemini-pro");
        }
        other => panic!("expected GenerationUnavailable, got {other:?}"),
    }
    assert!(error.to_string().contains("SDK and REST both failed"));
    assert!(error.to_string().contains("https://"));

    // 4 SDK models, 2 versions x 3 fallback models, nothing more
    assert_eq!(sdk.calls().len(), 4);
    assert_eq!(rest.list_calls(), 1);
    assert_eq!(rest.calls().len(), 6);

    let app_error: AppError = error.into();
    assert_eq!(app_error.code, ErrorCode::GenerationUnavailable);
    assert_eq!(app_error.http_status(), 500);
}

#[tokio::test]
async fn test_every_attempt_receives_framed_prompt() {
    let sdk = Arc::new(StubProvider::new().reply("gemini-pro", Reply::fail("quota")));
    let rest = Arc::new(
        StubRest::new().reply("v1beta", "gemini-1.5-flash", Reply::text(GOOD_RECIPE_JSON)),
    );
    let generator = generator_with(Some(Arc::clone(&sdk)), Arc::clone(&rest));

    generator.generate("Genera algo con arroz").await.unwrap();

    for prompt in sdk.prompts().iter().chain(rest.prompts().iter()) {
        assert!(prompt.starts_with("Eres un chef experto"));
        assert!(prompt.contains("Genera algo con arroz"));
        assert!(prompt.contains("Responde SOLO con un JSON"));
    }
    assert_eq!(sdk.prompts().len(), 4);
    assert_eq!(rest.prompts().len(), 1);
}

#[test]
fn test_missing_api_key_builds_no_generator() {
    let config = GeminiConfig::default();
    assert!(config.api_key.is_none());

    let result = RecipeGenerator::from_config(&config);
    assert!(matches!(result, Err(GenerationError::ConfigurationMissing)));
}

#[test]
fn test_configured_key_builds_generator_with_settings() {
    let config = GeminiConfig {
        api_key: Some("test-key".to_owned()),
        sdk_enabled: false,
        ..GeminiConfig::default()
    };

    let generator = RecipeGenerator::from_config(&config).unwrap();

    assert_eq!(generator.settings().api_versions, vec!["v1beta", "v1"]);
    assert!(!format!("{generator:?}").contains("test-key"));
}
