// SPDX-License-Identifier: MIT

//! Route guards consuming the derived session state.
//!
//! Two variants built on the same primitive: "authentication required" and
//! "authentication + profile required". While the state is still
//! [`SessionState::Resolving`] both guards answer [`GuardDecision::Pending`],
//! so the host renders a neutral loading placeholder instead of committing
//! to a redirect that resolution might immediately reverse.

use crate::resolver::SessionState;

/// Redirect targets the guards can name. [`crate::Config::path_for`] maps a
/// route to its concrete path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    ProfileCreation,
}

/// What a guarded view should do for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested view
    Allow,
    /// Navigate away instead of rendering
    Redirect(Route),
    /// Resolution in flight; render a loading placeholder and re-evaluate
    /// once the state changes
    Pending,
}

/// Guard for views that only require authentication.
pub fn auth_guard(state: SessionState) -> GuardDecision {
    match state {
        SessionState::Anonymous => GuardDecision::Redirect(Route::Login),
        SessionState::Resolving => GuardDecision::Pending,
        SessionState::AuthenticatedNoProfile | SessionState::AuthenticatedWithProfile => {
            GuardDecision::Allow
        }
    }
}

/// Guard for views that require authentication and a completed profile.
pub fn profile_guard(state: SessionState) -> GuardDecision {
    match state {
        SessionState::Anonymous => GuardDecision::Redirect(Route::Login),
        SessionState::Resolving => GuardDecision::Pending,
        SessionState::AuthenticatedNoProfile => GuardDecision::Redirect(Route::ProfileCreation),
        SessionState::AuthenticatedWithProfile => GuardDecision::Allow,
    }
}
