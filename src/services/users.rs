// ABOUTME: User account business logic: validation, creation, login checks and self-only edits
// ABOUTME: Hashes passwords through the auth manager and logs authentication outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Deserialize;

use crate::auth::AuthManager;
use crate::database::{Database, NewUser, UserPatch};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;

/// Shortest accepted password
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration (and `POST /users`) payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address, compared case-insensitively
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Body of `PATCH /users/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name
    pub name: Option<String>,
    /// New email address
    pub email: Option<String>,
    /// New plain-text password
    pub password: Option<String>,
}

/// Lowercase and trim an email address
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Reject obviously invalid email addresses
///
/// # Errors
///
/// Returns `INVALID_INPUT` unless the address has a non-empty local part and a dotted domain
pub fn validate_email(email: &str) -> AppResult<()> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!("Invalid email address: {email}")))
    }
}

/// Enforce the minimum password length
///
/// # Errors
///
/// Returns `INVALID_INPUT` for a password shorter than [`MIN_PASSWORD_LENGTH`]
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn require_self(caller_id: i64, user_id: i64) -> AppResult<()> {
    if caller_id == user_id {
        Ok(())
    } else {
        Err(AppError::permission_denied(
            "Users can only modify their own account",
        ))
    }
}

/// Account operations; writes are restricted to the account owner
#[derive(Clone, Debug)]
pub struct UserService {
    database: Database,
    auth_manager: AuthManager,
}

impl UserService {
    /// Create a service over the record store and auth manager
    #[must_use]
    pub const fn new(database: Database, auth_manager: AuthManager) -> Self {
        Self {
            database,
            auth_manager,
        }
    }

    /// Validate input, hash the password and create the user with an empty profile
    ///
    /// # Errors
    ///
    /// Returns a validation error, `RESOURCE_ALREADY_EXISTS` for a taken email,
    /// or a database error
    pub async fn create(&self, request: RegisterRequest) -> AppResult<User> {
        let name = request.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        validate_password(&request.password)?;

        let password_hash = self.auth_manager.hash_password(&request.password).await?;
        self.database
            .create_user(&NewUser {
                email,
                name,
                password_hash,
            })
            .await
    }

    /// Resolve email and password to the matching user
    ///
    /// Unknown emails and wrong passwords fail identically.
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` for bad credentials
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        let invalid = || AppError::auth_invalid("Invalid email or password");

        let Some(user) = self.database.get_user_by_email(&email).await? else {
            AppLogger::log_auth_event(&email, "login", false, Some("unknown email"));
            return Err(invalid());
        };

        if !self
            .auth_manager
            .verify_password(password, &user.password_hash)
            .await?
        {
            AppLogger::log_auth_event(&email, "login", false, Some("wrong password"));
            return Err(invalid());
        }
        Ok(user)
    }

    /// Every user
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.database.list_users().await
    }

    /// User by id, with profile
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown id
    pub async fn get(&self, user_id: i64) -> AppResult<User> {
        self.database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))
    }

    /// Update the caller's own account
    ///
    /// # Errors
    ///
    /// Returns `PERMISSION_DENIED` for another account, a validation error for
    /// bad fields, or `RESOURCE_NOT_FOUND` if the account is gone
    pub async fn update(
        &self,
        user_id: i64,
        caller_id: i64,
        request: UpdateUserRequest,
    ) -> AppResult<User> {
        require_self(caller_id, user_id)?;

        let name = match request.name.map(|name| name.trim().to_owned()) {
            Some(name) if name.is_empty() => return Err(AppError::missing_field("name")),
            other => other,
        };
        let email = request.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            validate_email(email)?;
        }
        let password_hash = match request.password {
            Some(password) => {
                validate_password(&password)?;
                Some(self.auth_manager.hash_password(&password).await?)
            }
            None => None,
        };

        let patch = UserPatch {
            email,
            name,
            password_hash,
        };
        self.database
            .update_user(user_id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))
    }

    /// Delete the caller's own account
    ///
    /// # Errors
    ///
    /// Returns `PERMISSION_DENIED` for another account or `RESOURCE_NOT_FOUND`
    pub async fn remove(&self, user_id: i64, caller_id: i64) -> AppResult<()> {
        require_self(caller_id, user_id)?;
        if self.database.delete_user(user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("User {user_id}")))
        }
    }
}
