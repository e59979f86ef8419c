// ABOUTME: JWT issuance and validation plus password hashing
// ABOUTME: Resolves bearer credentials to the authenticated user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET`. The user id travels in the
//! `sub` claim; handlers never accept an owner id from the request body.
//! Passwords are stored as bcrypt hashes computed off the async runtime.

use std::fmt::{self, Debug, Formatter};

use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task;
use tracing::debug;

use crate::config::AuthConfig;
use crate::constants::jwt;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Why a bearer token was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtValidationError {
    /// Token is past its `exp` claim
    #[error("JWT token has expired")]
    TokenExpired,
    /// Signature, audience or issuer mismatch
    #[error("JWT token is invalid: {reason}")]
    TokenInvalid {
        /// Underlying reason
        reason: String,
    },
    /// Token cannot be decoded at all
    #[error("JWT token is malformed: {details}")]
    TokenMalformed {
        /// Underlying decoding error
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
    /// Issuer
    pub iss: String,
}

/// Authenticated caller resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// Authenticated user id
    pub user_id: i64,
    /// Email carried in the token
    pub email: String,
}

/// Authentication manager for `JWT` tokens and password hashes
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: i64,
    bcrypt_cost: u32,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry_secs: i64, bcrypt_cost: u32) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            token_expiry_secs,
            bcrypt_cost,
        }
    }

    /// Create from the auth section of the server configuration
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            config.jwt_expiry_secs,
            config.bcrypt_cost,
        )
    }

    /// Token lifetime in seconds
    #[must_use]
    pub const fn token_expiry_secs(&self) -> i64 {
        self.token_expiry_secs
    }

    /// Generate an HS256 token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry cannot be represented or JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = Duration::try_seconds(self.token_expiry_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Token lifetime of {}s is out of range",
                    self.token_expiry_secs
                ))
            })?;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            aud: jwt::AUDIENCE.to_owned(),
            iss: jwt::ISSUER.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, forged or malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[jwt::AUDIENCE]);
        validation.set_issuer(&[jwt::ISSUER]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    fn convert_jwt_error(e: &JwtError) -> JwtValidationError {
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => JwtValidationError::TokenMalformed {
                details: e.to_string(),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: e.to_string(),
            },
        }
    }

    /// Resolve an `Authorization` header value to the calling user
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` when the header is absent and `AUTH_INVALID`
    /// or `AUTH_EXPIRED` when the token does not validate
    pub fn authenticate(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::auth_invalid("Authorization header must use Bearer scheme"))?;

        let claims = self.validate_token(token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::auth_invalid("Token subject is not a user id"))?;

        debug!(user_id, "Authenticated bearer token");
        Ok(AuthResult {
            user_id,
            email: claims.email,
        })
    }

    /// Hash a password with the configured bcrypt cost
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the blocking task is cancelled
    pub async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Check a password against a stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is corrupt or the blocking task is cancelled
    pub async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password check task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Stored password hash is invalid: {e}")))
    }
}

impl Debug for AuthManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}
