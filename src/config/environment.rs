// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses HTTP, database, auth, CORS and Gemini settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! Configuration is read once at startup. Malformed values are errors;
//! absent values fall back to the defaults in [`crate::constants::defaults`].
//! A missing Gemini API key is not an error: the server runs, reports the
//! condition at startup and answers generation requests with `503`.

use std::env;
use std::fmt::{self, Debug, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::{defaults, env_config, gemini, jwt};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe `SQLite` location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);

        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to an sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiry_secs: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_secs", &self.jwt_expiry_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma separated origins, or `*`
    pub allowed_origins: String,
}

/// Whether AI recipe generation can be served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationAvailability {
    /// API key present
    Ready,
    /// No API key; generation requests get `503`
    Unconfigured,
}

impl Display for GenerationAvailability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Unconfigured => write!(f, "unconfigured"),
        }
    }
}

/// Gemini upstream configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; `None` disables generation
    pub api_key: Option<String>,
    /// API host without version segment
    pub base_url: String,
    /// Whether the typed client strategy runs before REST
    pub sdk_enabled: bool,
    /// Ordered models for the typed client strategy
    pub sdk_models: Vec<String>,
    /// REST models used when listing fails or yields nothing
    pub rest_fallback_models: Vec<String>,
    /// REST API versions, newest first
    pub api_versions: Vec<String>,
}

impl GeminiConfig {
    /// Availability check performed once at startup
    #[must_use]
    pub const fn availability(&self) -> GenerationAvailability {
        if self.api_key.is_some() {
            GenerationAvailability::Ready
        } else {
            GenerationAvailability::Unconfigured
        }
    }

    /// Load Gemini settings from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_SDK_ENABLED` is not a boolean or a model
    /// or version list is present but empty
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(env_config::GEMINI_API_KEY)
            .ok()
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());

        Ok(Self {
            api_key,
            base_url: env_var_or(env_config::GEMINI_API_BASE_URL, gemini::API_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            sdk_enabled: parse_bool(env_config::GEMINI_SDK_ENABLED, true)?,
            sdk_models: list_var_or(env_config::GEMINI_SDK_MODELS, gemini::SDK_MODELS)?,
            rest_fallback_models: list_var_or(
                env_config::GEMINI_REST_MODELS,
                gemini::REST_FALLBACK_MODELS,
            )?,
            api_versions: list_var_or(env_config::GEMINI_API_VERSIONS, gemini::API_VERSIONS)?,
        })
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: gemini::API_BASE_URL.to_owned(),
            sdk_enabled: true,
            sdk_models: to_owned_list(gemini::SDK_MODELS),
            rest_fallback_models: to_owned_list(gemini::REST_FALLBACK_MODELS),
            api_versions: to_owned_list(gemini::API_VERSIONS),
        }
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("sdk_enabled", &self.sdk_enabled)
            .field("sdk_models", &self.sdk_models)
            .field("rest_fallback_models", &self.rest_fallback_models)
            .field("api_versions", &self.api_versions)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Gemini upstream configuration
    pub gemini: GeminiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or if
    /// `JWT_SECRET` is missing in production
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::from_str_or_default(&env_var_or(
            env_config::ENVIRONMENT,
            defaults::ENVIRONMENT,
        ));

        let database_url = env::var(env_config::DATABASE_URL)
            .or_else(|_| env::var(env_config::DATABASE_PATH))
            .unwrap_or_else(|_| defaults::DATABASE_URL.to_owned());

        let jwt_secret = match env::var(env_config::JWT_SECRET) {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                return Err(AppError::new(
                    ErrorCode::ConfigMissing,
                    format!("{} must be set in production", env_config::JWT_SECRET),
                ));
            }
            _ => defaults::DEV_JWT_SECRET.to_owned(),
        };

        let expiry = env_var_or(env_config::JWT_EXPIRES_IN, defaults::JWT_EXPIRES_IN);
        let jwt_expiry_secs = parse_duration_secs(&expiry).ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!(
                    "{} has invalid value '{expiry}' (expected e.g. 7d, 12h, 30m, 3600; at most 3650d)",
                    env_config::JWT_EXPIRES_IN
                ),
            )
        })?;

        let bcrypt_cost: u32 = parse_env(env_config::BCRYPT_COST, defaults::BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!(
                    "{} must be between 4 and 31, got {bcrypt_cost}",
                    env_config::BCRYPT_COST
                ),
            ));
        }

        Ok(Self {
            host: env_var_or(env_config::HOST, defaults::HOST),
            http_port: parse_env(env_config::PORT, defaults::HTTP_PORT)?,
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&database_url),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_secs,
                bcrypt_cost,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or(
                    env_config::CORS_ALLOWED_ORIGINS,
                    defaults::CORS_ALLOWED_ORIGINS,
                ),
            },
            gemini: GeminiConfig::from_env()?,
        })
    }

    /// Conditions an operator should know about before serving traffic
    #[must_use]
    pub fn startup_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.gemini.availability() == GenerationAvailability::Unconfigured {
            warnings.push(format!(
                "{} is not set: POST /recipes/ai will answer 503 until it is configured ({})",
                env_config::GEMINI_API_KEY,
                gemini::API_KEY_HELP_URL
            ));
        }
        if self.auth.jwt_secret == defaults::DEV_JWT_SECRET {
            warnings.push(format!(
                "{} is not set: using the development signing secret",
                env_config::JWT_SECRET
            ));
        }
        warnings
    }

    /// Human-readable configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "ChefGPT Server Configuration:\n\
             - Environment: {}\n\
             - Bind: {}:{}\n\
             - Database: {}\n\
             - Token lifetime: {}s\n\
             - CORS origins: {}\n\
             - AI generation: {}\n\
             - Typed client strategy: {} ({})\n\
             - REST fallback models: {}\n\
             - REST API versions: {}",
            self.environment,
            self.host,
            self.http_port,
            self.database.url,
            self.auth.jwt_expiry_secs,
            self.cors.allowed_origins,
            self.gemini.availability(),
            if self.gemini.sdk_enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.gemini.sdk_models.join(", "),
            self.gemini.rest_fallback_models.join(", "),
            self.gemini.api_versions.join(", "),
        )
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================

/// Read an environment variable with a default
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, failing on malformed values
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("{key} has invalid value '{raw}': {e}"),
            )
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a boolean flag accepting true/false, 1/0, yes/no
fn parse_bool(key: &str, default: bool) -> AppResult<bool> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!("{key} must be a boolean, got '{raw}'"),
            )),
        },
        Err(_) => Ok(default),
    }
}

/// Read a comma separated list, falling back to `default` when unset
fn list_var_or(key: &str, default: &[&str]) -> AppResult<Vec<String>> {
    let Ok(raw) = env::var(key) else {
        return Ok(to_owned_list(default));
    };
    let items = parse_list(&raw);
    if items.is_empty() {
        return Err(AppError::new(
            ErrorCode::ConfigInvalid,
            format!("{key} is set but lists no values"),
        ));
    }
    Ok(items)
}

/// Split a comma separated list, dropping blanks
#[must_use]
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parse a lifetime such as `7d`, `12h`, `30m`, `45s` or a bare number of seconds
///
/// Values above [`jwt::MAX_EXPIRY_SECS`] are rejected.
#[must_use]
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let split_at = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split_at);
    let value: i64 = digits.parse().ok()?;
    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        _ => return None,
    };
    value
        .checked_mul(multiplier)
        .filter(|secs| (1..=jwt::MAX_EXPIRY_SECS).contains(secs))
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}
