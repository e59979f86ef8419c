// ABOUTME: HTTP tests for user account listing, update and deletion
// ABOUTME: Verifies accounts can only be modified by their owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::api_client;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_user_without_auth() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);

    let response = AxumTestRequest::post("/users")
        .json(&json!({"name": "Carla", "email": "carla@example.com", "password": "secret123"}))
        .send(app)
        .await;

    assert_eq!(response.status(), 201);
    let user: Value = response.json();
    assert_eq!(user["email"], "carla@example.com");
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_list_and_get_users() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (ana_id, token) = api_client::register_user(&app, "Ana", "ana@example.com").await;
    api_client::register_user(&app, "Bea", "bea@example.com").await;

    let list = AxumTestRequest::get("/users").bearer(&token).send(app.clone()).await;
    assert_eq!(list.status(), 200);
    let users: Vec<Value> = list.json();
    assert_eq!(users.len(), 2);

    let one = AxumTestRequest::get(&format!("/users/{ana_id}"))
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(one.status(), 200);
    let user: Value = one.json();
    assert_eq!(user["name"], "Ana");

    let missing = AxumTestRequest::get("/users/9999").bearer(&token).send(app.clone()).await;
    assert_eq!(missing.status(), 404);

    let anonymous = AxumTestRequest::get("/users").send(app).await;
    assert_eq!(anonymous.status(), 401);
}

#[tokio::test]
async fn test_update_own_account() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (user_id, token) = api_client::register_user(&app, "Ana", "ana@example.com").await;

    let response = AxumTestRequest::patch(&format!("/users/{user_id}"))
        .bearer(&token)
        .json(&json!({"name": "Ana María", "password": "nueva-clave"}))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let user: Value = response.json();
    assert_eq!(user["name"], "Ana María");

    let login = AxumTestRequest::post("/auth/login")
        .json(&json!({"email": "ana@example.com", "password": "nueva-clave"}))
        .send(app)
        .await;
    assert_eq!(login.status(), 200);
}

#[tokio::test]
async fn test_cannot_modify_another_account() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (_, token) = api_client::register_user(&app, "Ana", "ana@example.com").await;
    let (bea_id, _) = api_client::register_user(&app, "Bea", "bea@example.com").await;
    let uri = format!("/users/{bea_id}");

    let patch = AxumTestRequest::patch(&uri)
        .bearer(&token)
        .json(&json!({"name": "Hacked"}))
        .send(app.clone())
        .await;
    assert_eq!(patch.status(), 403);
    let body: Value = patch.json();
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");

    let delete = AxumTestRequest::delete(&uri).bearer(&token).send(app).await;
    assert_eq!(delete.status(), 403);
}

#[tokio::test]
async fn test_delete_own_account_cascades() {
    let resources = common::create_test_resources().await;
    let app = common::router(&resources);
    let (user_id, token) = api_client::register_user(&app, "Ana", "ana@example.com").await;
    api_client::create_recipe(&app, &token, "Tortilla").await;

    let response = AxumTestRequest::delete(&format!("/users/{user_id}"))
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 204);

    assert!(resources.database.get_user(user_id).await.unwrap().is_none());
    assert!(resources
        .database
        .get_profile_by_user(user_id)
        .await
        .unwrap()
        .is_none());
    assert!(resources
        .database
        .list_recipes_by_user(user_id)
        .await
        .unwrap()
        .is_empty());
}
