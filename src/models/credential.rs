// SPDX-License-Identifier: MIT

//! Bearer credential and the cached profile belief.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

/// Tri-state cached belief about whether the current user has completed
/// profile creation.
///
/// `Confirmed(false)` may only ever be set from an explicit backend
/// "profile not found" (404), never from a generic error. The flag must be
/// `Unknown` whenever no token is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileFlag {
    #[default]
    Unknown,
    Confirmed(bool),
}

/// Bearer credential held by the store. Absent token means anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Opaque bearer token
    pub token: Option<String>,
    /// Subject claim decoded from the token payload. `None` when the token
    /// is absent or its payload cannot be decoded (degraded mode: still
    /// authenticated, numeric id unavailable).
    pub user_id: Option<u64>,
}

impl Credential {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Participant-membership check ("am I this user?") that degrades to
    /// no-match when the subject claim could not be decoded.
    pub fn is_user(&self, id: u64) -> bool {
        self.user_id == Some(id)
    }
}

/// Claims we care about in the token payload. No signature verification is
/// performed client-side; the backend is the trust boundary.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<serde_json::Value>,
}

/// Decode the subject claim from a JWT-shaped bearer token.
///
/// Tokens are `header.payload.signature` with a base64url JSON payload.
/// Returns `None` on any decode failure rather than erroring: the token
/// remains usable for auth, only id-dependent features degrade.
pub fn decode_subject(token: &str) -> Option<u64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    match claims.sub? {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
