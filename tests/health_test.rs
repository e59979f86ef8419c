// ABOUTME: Tests for the health endpoint and request id propagation
// ABOUTME: Reports database status and AI generation availability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use chefgpt_server::middleware::REQUEST_ID_HEADER;
use helpers::axum_test::AxumTestRequest;
use helpers::stub_gemini::{generator_with, StubRest};
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_unconfigured_generation() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);

    let response = AxumTestRequest::get("/health").send(app).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["ai_generation"], "unconfigured");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_health_reports_ready_generation() {
    let generator = generator_with(None, Arc::new(StubRest::new()));
    let resources = common::create_test_resources_with(Some(Arc::new(generator))).await;
    let app = common::router(&resources);

    let body: Value = AxumTestRequest::get("/health").send(app).await.json();

    assert_eq!(body["ai_generation"], "ready");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);

    let generated = AxumTestRequest::get("/health").send(app.clone()).await;
    let request_id = generated.header(REQUEST_ID_HEADER).unwrap();
    assert!(!request_id.is_empty());

    let supplied = AxumTestRequest::get("/health")
        .header(REQUEST_ID_HEADER, "test-request-42")
        .send(app)
        .await;
    assert_eq!(
        supplied.header(REQUEST_ID_HEADER).as_deref(),
        Some("test-request-42")
    );
}
