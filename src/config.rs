// SPDX-License-Identifier: MIT

//! Runtime configuration loaded from environment variables.
//!
//! The backend base URL is constant for a deployment, not dynamically
//! discovered; everything has a local-development default.

use crate::guard::Route;
use std::env;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/v1";
const DEFAULT_LOGIN_ROUTE: &str = "/login";
const DEFAULT_PROFILE_ROUTE: &str = "/profile";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend REST API base URL (no trailing slash)
    pub api_base_url: String,
    /// Route guards redirect anonymous visitors to
    pub login_route: String,
    /// Route guards redirect profile-less users to
    pub profile_creation_route: String,
}

impl Default for Config {
    /// Default config for local development and tests.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            profile_creation_route: DEFAULT_PROFILE_ROUTE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (`.env` supported).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("API_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        reqwest::Url::parse(&api_base_url)
            .map_err(|_| ConfigError::InvalidUrl(api_base_url.clone()))?;

        Ok(Self {
            api_base_url,
            login_route: env::var("LOGIN_ROUTE").unwrap_or_else(|_| DEFAULT_LOGIN_ROUTE.to_string()),
            profile_creation_route: env::var("PROFILE_ROUTE")
                .unwrap_or_else(|_| DEFAULT_PROFILE_ROUTE.to_string()),
        })
    }

    /// Concrete path for a guard redirect target.
    pub fn path_for(&self, route: Route) -> &str {
        match route {
            Route::Login => &self.login_route,
            Route::ProfileCreation => &self.profile_creation_route,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_BASE_URL is not a valid URL: {0}")]
    InvalidUrl(String),
}
