// SPDX-License-Identifier: MIT

//! Pure session decision.
//!
//! The whole redirect question reduces to one total function over the
//! persisted credential and the cached profile belief. Keeping it pure means
//! it can be unit-tested over every input combination with no network or
//! storage involved.

use crate::models::{Credential, ProfileFlag};

/// Derived session state. Never stored; always recomputed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    /// Transient: a profile resolution is required before any redirect may
    /// be based on this state.
    Resolving,
    AuthenticatedNoProfile,
    AuthenticatedWithProfile,
}

/// Map credential and profile belief to a session state.
pub fn decide(credential: &Credential, flag: ProfileFlag) -> SessionState {
    if credential.token.is_none() {
        return SessionState::Anonymous;
    }
    match flag {
        ProfileFlag::Confirmed(false) => SessionState::AuthenticatedNoProfile,
        ProfileFlag::Confirmed(true) => SessionState::AuthenticatedWithProfile,
        ProfileFlag::Unknown => SessionState::Resolving,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anon() -> Credential {
        Credential::default()
    }

    fn authed() -> Credential {
        Credential {
            token: Some("tok123".to_string()),
            user_id: Some(7),
        }
    }

    #[test]
    fn no_token_is_anonymous_regardless_of_flag() {
        // The store clears the flag on logout, but decide() must hold the
        // line even if handed an inconsistent combination.
        assert_eq!(decide(&anon(), ProfileFlag::Unknown), SessionState::Anonymous);
        assert_eq!(
            decide(&anon(), ProfileFlag::Confirmed(true)),
            SessionState::Anonymous
        );
        assert_eq!(
            decide(&anon(), ProfileFlag::Confirmed(false)),
            SessionState::Anonymous
        );
    }

    #[test]
    fn token_with_unknown_flag_is_resolving() {
        assert_eq!(decide(&authed(), ProfileFlag::Unknown), SessionState::Resolving);
    }

    #[test]
    fn token_with_confirmed_absent_needs_profile() {
        assert_eq!(
            decide(&authed(), ProfileFlag::Confirmed(false)),
            SessionState::AuthenticatedNoProfile
        );
    }

    #[test]
    fn token_with_confirmed_present_is_fully_authenticated() {
        assert_eq!(
            decide(&authed(), ProfileFlag::Confirmed(true)),
            SessionState::AuthenticatedWithProfile
        );
    }

    #[test]
    fn token_without_decodable_user_id_still_authenticates() {
        // Malformed token payload is non-fatal; only id-dependent features
        // degrade.
        let degraded = Credential {
            token: Some("opaque-not-a-jwt".to_string()),
            user_id: None,
        };
        assert_eq!(
            decide(&degraded, ProfileFlag::Confirmed(true)),
            SessionState::AuthenticatedWithProfile
        );
    }
}
