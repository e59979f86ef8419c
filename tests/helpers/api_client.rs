// ABOUTME: HTTP shortcuts that drive the public API to set up test fixtures
// ABOUTME: Registers users and creates recipes through the real routes

use axum::Router;
use serde_json::{json, Value};

use super::axum_test::AxumTestRequest;

/// Password used by [`register_user`]
pub const TEST_PASSWORD: &str = "secret123";

/// Register a user through the HTTP API; returns `(user_id, token)`
pub async fn register_user(app: &Router, name: &str, email: &str) -> (i64, String) {
    let response = AxumTestRequest::post("/auth/register")
        .json(&json!({ "name": name, "email": email, "password": TEST_PASSWORD }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201, "registration of {email} failed");

    let body: Value = response.json();
    let user_id = body["user"]["id"].as_i64().expect("user id");
    let token = body["access_token"]
        .as_str()
        .expect("access token")
        .to_owned();
    (user_id, token)
}

/// Create a recipe through the HTTP API and return its JSON
pub async fn create_recipe(app: &Router, token: &str, title: &str) -> Value {
    let response = AxumTestRequest::post("/recipes")
        .bearer(token)
        .json(&json!({
            "title": title,
            "ingredients": "2 huevos\n1 patata",
            "steps": "1. Batir\n2. Freír",
            "style": "casera",
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201, "recipe creation failed");
    response.json()
}
