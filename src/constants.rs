// ABOUTME: Application constants for environment keys, defaults and upstream endpoints
// ABOUTME: Single place for every literal the server is configured by
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application-wide constants organized by domain

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the HTTP server binary
    pub const CHEFGPT_SERVER: &str = "chefgpt-server";
}

/// Environment variable names
pub mod env_config {
    /// Bind host
    pub const HOST: &str = "HOST";
    /// Bind port
    pub const PORT: &str = "PORT";
    /// Deployment environment (development, production)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// sqlx connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Bare `SQLite` file path, accepted when `DATABASE_URL` is unset
    pub const DATABASE_PATH: &str = "DATABASE_PATH";
    /// HS256 signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// Token lifetime such as `7d`, `12h` or a number of seconds
    pub const JWT_EXPIRES_IN: &str = "JWT_EXPIRES_IN";
    /// bcrypt work factor
    pub const BCRYPT_COST: &str = "BCRYPT_COST";
    /// Comma separated list of allowed origins, or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini API base URL (without version segment)
    pub const GEMINI_API_BASE_URL: &str = "GEMINI_API_BASE_URL";
    /// Whether the typed client strategy is enabled
    pub const GEMINI_SDK_ENABLED: &str = "GEMINI_SDK_ENABLED";
    /// Ordered model list for the typed client strategy
    pub const GEMINI_SDK_MODELS: &str = "GEMINI_SDK_MODELS";
    /// Fallback model list for the REST strategy
    pub const GEMINI_REST_MODELS: &str = "GEMINI_REST_MODELS";
    /// API versions tried by the REST strategy, newest first
    pub const GEMINI_API_VERSIONS: &str = "GEMINI_API_VERSIONS";
}

/// Default configuration values
pub mod defaults {
    /// Default bind host
    pub const HOST: &str = "127.0.0.1";
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 3001;
    /// Default environment
    pub const ENVIRONMENT: &str = "development";
    /// Default database
    pub const DATABASE_URL: &str = "sqlite:./chefgpt.db";
    /// Development-only signing secret
    pub const DEV_JWT_SECRET: &str = "chefgpt-development-secret-change-me";
    /// Default token lifetime
    pub const JWT_EXPIRES_IN: &str = "7d";
    /// Default bcrypt cost
    pub const BCRYPT_COST: u32 = 12;
    /// Default allowed origin (the web client dev server)
    pub const CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000";
}

/// JWT claim constants
pub mod jwt {
    /// Audience claim of every issued token
    pub const AUDIENCE: &str = "chefgpt-api";
    /// Issuer claim of every issued token
    pub const ISSUER: &str = "chefgpt-server";
    /// Longest accepted token lifetime (10 years)
    pub const MAX_EXPIRY_SECS: i64 = 10 * 365 * 86_400;
}

/// Google Generative Language API
pub mod gemini {
    /// Public API host
    pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
    /// Version the typed client and model listing use
    pub const PRIMARY_API_VERSION: &str = "v1beta";
    /// API versions tried by the REST strategy, newest first
    pub const API_VERSIONS: &[&str] = &["v1beta", "v1"];
    /// Models tried in order by the typed client strategy
    pub const SDK_MODELS: &[&str] = &[
        "gemini-2.5-flash",
        "gemini-1.5-flash",
        "gemini-1.5-pro",
        "gemini-pro",
    ];
    /// Models tried by the REST strategy when listing fails
    pub const REST_FALLBACK_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];
    /// Substring a listed model must contain to be a candidate
    pub const MODEL_FAMILY: &str = "gemini";
    /// Method a listed model must advertise to be a candidate
    pub const GENERATE_CONTENT_METHOD: &str = "generateContent";
    /// Prefix the list-models endpoint puts in front of model ids
    pub const MODEL_NAME_PREFIX: &str = "models/";
    /// Where users can check or create an API key
    pub const API_KEY_HELP_URL: &str = "https://aistudio.google.com/app/apikey";
}
