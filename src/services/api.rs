// SPDX-License-Identifier: MIT

//! Sportify backend REST client.
//!
//! Handles:
//! - Signup/login calls (anonymous)
//! - Profile fetch with outcome classification
//! - Profile create/update with bearer auth
//!
//! The profile fetch is deliberately side-effect-free with respect to
//! storage and never errors across its boundary: every failure mode is
//! classified into a [`ProfileOutcome`] so the persistence policy lives in
//! one place, the session controller.

use crate::config::Config;
use crate::error::SessionError;
use crate::models::{Credential, Profile, ProfileDraft};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of asking the backend whether the current user has a profile.
#[derive(Debug, Clone)]
pub enum ProfileOutcome {
    /// 200 with a profile body
    Found(Profile),
    /// Explicit 404: the profile definitely does not exist
    ConfirmedAbsent,
    /// Anything else: network failure, 5xx, malformed body, auth rejection
    Indeterminate(String),
}

/// Port the session controller resolves profiles through.
#[async_trait]
pub trait ProfileOracle: Send + Sync {
    /// Make one authenticated request for the current user's profile and
    /// classify the result.
    async fn resolve(&self, credential: &Credential) -> ProfileOutcome;
}

/// Login/signup request body.
#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Login/signup response. Some backend variants embed the profile in the
/// login response; when present it lets the controller skip resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Sportify backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    /// Register a new account.
    ///
    /// POST /auth/signup {email, password} -> {token}
    pub async fn signup(&self, email: &str, password: &str) -> Result<LoginResponse, SessionError> {
        self.auth_call("signup", email, password).await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// POST /auth/login {email, password} -> {token, profile?}
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, SessionError> {
        self.auth_call("login", email, password).await
    }

    async fn auth_call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, SessionError> {
        let url = format!("{}/auth/{}", self.base_url, endpoint);
        let response = self
            .http
            .post(&url)
            .json(&AuthRequest { email, password })
            .send()
            .await
            .map_err(|e| SessionError::Backend(format!("{} request failed: {}", endpoint, e)))?;

        // A 401 here means bad credentials, not a dead session.
        self.check_response_json(response).await.map_err(|e| match e {
            SessionError::Unauthorized => SessionError::InvalidCredentials,
            other => other,
        })
    }

    /// Fetch the current user's profile and classify the result.
    ///
    /// GET /profile/{id} with bearer auth. An id of 0 is resolved by the
    /// backend to the token's own subject, which covers the degraded case
    /// where the subject claim could not be decoded.
    pub async fn fetch_profile(&self, token: &str, user_id: Option<u64>) -> ProfileOutcome {
        let url = format!("{}/profile/{}", self.base_url, user_id.unwrap_or(0));
        let response = match self.http.get(&url).bearer_auth(token).send().await {
            Ok(r) => r,
            Err(e) => return ProfileOutcome::Indeterminate(format!("request failed: {}", e)),
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return ProfileOutcome::ConfirmedAbsent;
        }
        if !status.is_success() {
            return ProfileOutcome::Indeterminate(format!("HTTP {}", status));
        }
        match response.json::<Profile>().await {
            Ok(profile) => ProfileOutcome::Found(profile),
            Err(e) => ProfileOutcome::Indeterminate(format!("malformed profile body: {}", e)),
        }
    }

    /// POST /profile with bearer auth.
    pub async fn create_profile(
        &self,
        token: &str,
        draft: &ProfileDraft,
    ) -> Result<Profile, SessionError> {
        let url = format!("{}/profile", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(draft)
            .send()
            .await
            .map_err(|e| SessionError::Backend(format!("create profile failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// PUT /profile with bearer auth.
    pub async fn update_profile(
        &self,
        token: &str,
        draft: &ProfileDraft,
    ) -> Result<Profile, SessionError> {
        let url = format!("{}/profile", self.base_url);
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(draft)
            .send()
            .await
            .map_err(|e| SessionError::Backend(format!("update profile failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, SessionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(SessionError::Unauthorized);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(SessionError::NotFound(body));
            }
            if status == reqwest::StatusCode::BAD_REQUEST {
                return Err(SessionError::BadRequest(body));
            }
            return Err(SessionError::Backend(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| SessionError::Backend(format!("malformed response body: {}", e)))
    }
}

#[async_trait]
impl ProfileOracle for ApiClient {
    async fn resolve(&self, credential: &Credential) -> ProfileOutcome {
        match &credential.token {
            Some(token) => self.fetch_profile(token, credential.user_id).await,
            None => ProfileOutcome::Indeterminate("no bearer token held".to_string()),
        }
    }
}
