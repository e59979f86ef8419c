// ABOUTME: Tests for the SQLite store: schema, constraints and cascades
// ABOUTME: Runs against both in-memory and file-backed databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use chefgpt_server::database::{Database, NewUser, RecipePatch, UserPatch};
use chefgpt_server::errors::ErrorCode;
use chefgpt_server::models::{RecipeDraft, User};
use tempfile::TempDir;

async fn create_user(database: &Database, email: &str) -> User {
    database
        .create_user(&NewUser {
            email: email.to_owned(),
            name: "Cook".to_owned(),
            password_hash: "$2b$04$hash".to_owned(),
        })
        .await
        .unwrap()
}

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_owned(),
        ingredients: "harina\nagua".to_owned(),
        steps: "1. Amasar".to_owned(),
        style: None,
    }
}

#[tokio::test]
async fn test_user_creation_includes_profile() {
    let database = common::create_test_database().await;

    let user = create_user(&database, "cook@example.com").await;

    let profile = user.profile.expect("profile created with user");
    assert_eq!(profile.user_id, user.id);
    assert_eq!(profile.bio, "");
    let by_email = database
        .get_user_by_email("cook@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let database = common::create_test_database().await;
    create_user(&database, "cook@example.com").await;

    let error = database
        .create_user(&NewUser {
            email: "cook@example.com".to_owned(),
            name: "Other".to_owned(),
            password_hash: "x".to_owned(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(database.list_users().await.unwrap().len(), 1);
    assert_eq!(database.list_profiles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_patch_keeps_unset_fields() {
    let database = common::create_test_database().await;
    let user = create_user(&database, "cook@example.com").await;

    let updated = database
        .update_user(
            user.id,
            &UserPatch {
                name: Some("Chef".to_owned()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Chef");
    assert_eq!(updated.email, "cook@example.com");
    assert!(database
        .update_user(999, &UserPatch::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_recipe_crud() {
    let database = common::create_test_database().await;
    let user = create_user(&database, "cook@example.com").await;

    let recipe = database.create_recipe(user.id, &draft("Pan")).await.unwrap();
    assert_eq!(recipe.user_id, user.id);
    assert!(recipe.style.is_none());

    let updated = database
        .update_recipe(
            recipe.id,
            &RecipePatch {
                style: Some("rústica".to_owned()),
                ..RecipePatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Pan");
    assert_eq!(updated.style.as_deref(), Some("rústica"));

    assert!(database.delete_recipe(recipe.id).await.unwrap());
    assert!(!database.delete_recipe(recipe.id).await.unwrap());
    assert!(database.get_recipe(recipe.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_recipe_for_unknown_owner_fails() {
    let database = common::create_test_database().await;

    let result = database.create_recipe(4242, &draft("Huérfana")).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_favorite_uniqueness_and_join() {
    let database = common::create_test_database().await;
    let user = create_user(&database, "cook@example.com").await;
    let recipe = database.create_recipe(user.id, &draft("Pan")).await.unwrap();

    let favorite = database.create_favorite(user.id, recipe.id).await.unwrap();
    assert_eq!(favorite.recipe_id, recipe.id);

    let duplicate = database.create_favorite(user.id, recipe.id).await.unwrap_err();
    assert_eq!(duplicate.code, ErrorCode::ResourceAlreadyExists);

    let listed = database.list_favorites_by_user(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].recipe.as_ref().unwrap().title, "Pan");

    assert!(database
        .delete_favorite_by_recipe(user.id, recipe.id)
        .await
        .unwrap());
    assert!(database.get_favorite(favorite.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let database = common::create_test_database().await;
    let user = create_user(&database, "cook@example.com").await;
    let recipe = database.create_recipe(user.id, &draft("Pan")).await.unwrap();
    database.create_favorite(user.id, recipe.id).await.unwrap();

    assert!(database.delete_user(user.id).await.unwrap());

    assert!(database.get_recipe(recipe.id).await.unwrap().is_none());
    assert!(database.list_profiles().await.unwrap().is_empty());
    assert!(database
        .list_favorites_by_user(user.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("chefgpt.db").display());

    let user_id = {
        let database = Database::new(&url).await.unwrap();
        let user = create_user(&database, "cook@example.com").await;
        database.create_recipe(user.id, &draft("Pan")).await.unwrap();
        database.pool().close().await;
        user.id
    };

    let reopened = Database::new(&url).await.unwrap();
    reopened.ping().await.unwrap();
    let recipes = reopened.list_recipes_by_user(user_id).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Pan");
}
