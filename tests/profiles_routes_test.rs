// ABOUTME: HTTP tests for public profile reads and owner-only profile writes
// ABOUTME: Profiles are created with the account and looked up by id or user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::Router;
use helpers::api_client;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn profile_id_for(app: &Router, user_id: i64) -> i64 {
    let response = AxumTestRequest::get(&format!("/profiles/user/{user_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let profile: Value = response.json();
    profile["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_profiles_are_public() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (ana_id, _) = api_client::register_user(&app, "Ana", "ana@example.com").await;
    api_client::register_user(&app, "Bea", "bea@example.com").await;

    let list = AxumTestRequest::get("/profiles").send(app.clone()).await;
    assert_eq!(list.status(), 200);
    let profiles: Vec<Value> = list.json();
    assert_eq!(profiles.len(), 2);

    let profile_id = profile_id_for(&app, ana_id).await;
    let one = AxumTestRequest::get(&format!("/profiles/{profile_id}"))
        .send(app.clone())
        .await;
    assert_eq!(one.status(), 200);

    let missing = AxumTestRequest::get("/profiles/user/4242").send(app).await;
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_owner_updates_profile() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (user_id, token) = api_client::register_user(&app, "Ana", "ana@example.com").await;
    let profile_id = profile_id_for(&app, user_id).await;

    let response = AxumTestRequest::patch(&format!("/profiles/{profile_id}"))
        .bearer(&token)
        .json(&json!({"bio": "Cocinera aficionada", "avatar": "https://img.example.com/ana.png"}))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let profile: Value = response.json();
    assert_eq!(profile["bio"], "Cocinera aficionada");
    assert_eq!(profile["avatar"], "https://img.example.com/ana.png");
    assert_eq!(profile["userId"], user_id);
}

#[tokio::test]
async fn test_profile_writes_require_owner() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (ana_id, _) = api_client::register_user(&app, "Ana", "ana@example.com").await;
    let (_, bea_token) = api_client::register_user(&app, "Bea", "bea@example.com").await;
    let uri = format!("/profiles/{}", profile_id_for(&app, ana_id).await);

    let anonymous = AxumTestRequest::patch(&uri)
        .json(&json!({"bio": "x"}))
        .send(app.clone())
        .await;
    assert_eq!(anonymous.status(), 401);

    let patch = AxumTestRequest::patch(&uri)
        .bearer(&bea_token)
        .json(&json!({"bio": "x"}))
        .send(app.clone())
        .await;
    assert_eq!(patch.status(), 403);

    let delete = AxumTestRequest::delete(&uri).bearer(&bea_token).send(app.clone()).await;
    assert_eq!(delete.status(), 403);

    let missing = AxumTestRequest::delete("/profiles/9999").bearer(&bea_token).send(app).await;
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_owner_deletes_profile() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (user_id, token) = api_client::register_user(&app, "Ana", "ana@example.com").await;
    let profile_id = profile_id_for(&app, user_id).await;

    let response = AxumTestRequest::delete(&format!("/profiles/{profile_id}"))
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 204);

    let gone = AxumTestRequest::get(&format!("/profiles/user/{user_id}"))
        .send(app)
        .await;
    assert_eq!(gone.status(), 404);
}
