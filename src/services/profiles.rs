// ABOUTME: Profile business logic with public reads and owner-only writes
// ABOUTME: Rejects edits to someone else's profile with PERMISSION_DENIED
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Deserialize;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Profile;

/// Body of `PATCH /profiles/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    /// New biography
    pub bio: Option<String>,
    /// New avatar URL
    pub avatar: Option<String>,
}

/// Profile lookups and owner-checked edits
#[derive(Clone, Debug)]
pub struct ProfileService {
    database: Database,
}

impl ProfileService {
    /// Create a service over the record store
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Every profile
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn list(&self) -> AppResult<Vec<Profile>> {
        self.database.list_profiles().await
    }

    /// Profile by id
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown id
    pub async fn get(&self, profile_id: i64) -> AppResult<Profile> {
        self.database
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {profile_id}")))
    }

    /// Profile of a user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the user has no profile
    pub async fn get_by_user(&self, user_id: i64) -> AppResult<Profile> {
        self.database
            .get_profile_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))
    }

    async fn owned(&self, profile_id: i64, caller_id: i64) -> AppResult<Profile> {
        let profile = self.get(profile_id).await?;
        if profile.user_id != caller_id {
            return Err(AppError::permission_denied(
                "Users can only modify their own profile",
            ));
        }
        Ok(profile)
    }

    /// Update the caller's own profile
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown id and `PERMISSION_DENIED`
    /// for someone else's profile
    pub async fn update(
        &self,
        profile_id: i64,
        caller_id: i64,
        request: &UpdateProfileRequest,
    ) -> AppResult<Profile> {
        self.owned(profile_id, caller_id).await?;
        self.database
            .update_profile(profile_id, request.bio.as_deref(), request.avatar.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {profile_id}")))
    }

    /// Delete the caller's own profile
    ///
    /// # Errors
    ///
    /// Same as [`Self::update`]
    pub async fn remove(&self, profile_id: i64, caller_id: i64) -> AppResult<()> {
        self.owned(profile_id, caller_id).await?;
        if self.database.delete_profile(profile_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Profile {profile_id}")))
        }
    }
}
