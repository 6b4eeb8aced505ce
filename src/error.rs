// SPDX-License-Identifier: MIT

//! Session error types.
//!
//! Views never see raw network errors for session questions -- those are
//! classified into [`crate::services::ProfileOutcome`] before they reach the
//! controller. `SessionError` covers the remaining surfaces: login/signup,
//! profile create/update, and configuration.

/// Error type for session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend rejected our bearer token. Fatal for the session.
    #[error("Authentication required")]
    Unauthorized,

    /// Login or signup rejected the supplied credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Network failure, 5xx, or a malformed response body.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl SessionError {
    /// True when the backend rejected our bearer token; callers must tear
    /// the session down rather than retry.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SessionError::Unauthorized)
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
