// SPDX-License-Identifier: MIT

//! Session controller: the single owner of credential mutation.
//!
//! Orchestrates login, logout, profile resolution, and profile updates over
//! the credential store, and broadcasts every resulting [`SessionState`] to
//! subscribed route guards over a watch channel. Guards and views only ever
//! read; all writes funnel through here, which is what makes the fail-open
//! policy and the single-flight resolution enforceable.

use crate::config::Config;
use crate::error::SessionError;
use crate::models::{Profile, ProfileDraft, ProfileFlag};
use crate::resolver::{decide, SessionState};
use crate::services::{ApiClient, ProfileOracle, ProfileOutcome};
use crate::store::{CredentialStore, MemoryStore};
use std::sync::RwLock;
use tokio::sync::{watch, Mutex};
use validator::Validate;

/// Session controller over a credential store and a profile oracle.
pub struct SessionController<S, O> {
    store: S,
    oracle: O,
    /// Single-flight latch: true once a profile resolution has completed
    /// this session. Held across the oracle await so a second concurrent
    /// caller observes the in-flight result instead of issuing a duplicate
    /// request. Login and teardown also serialize on it, so a resolution
    /// outcome is never applied across an identity change.
    resolved: Mutex<bool>,
    /// Last profile the backend handed us, for views that want the data and
    /// not just the flag.
    profile: RwLock<Option<Profile>>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionController<MemoryStore, ApiClient> {
    /// Controller wired to the default in-process store and the REST-backed
    /// oracle.
    pub fn from_config(config: &Config) -> Self {
        Self::new(MemoryStore::new(), ApiClient::from_config(config))
    }
}

impl<S, O> SessionController<S, O>
where
    S: CredentialStore,
    O: ProfileOracle,
{
    pub fn new(store: S, oracle: O) -> Self {
        let initial = decide(&store.get(), store.profile_flag());
        let (state_tx, _) = watch::channel(initial);
        Self {
            store,
            oracle,
            resolved: Mutex::new(false),
            profile: RwLock::new(None),
            state_tx,
        }
    }

    /// Current session state, recomputed from the store.
    pub fn state(&self) -> SessionState {
        decide(&self.store.get(), self.store.profile_flag())
    }

    /// Current credential snapshot, for id-dependent view features.
    pub fn credential(&self) -> crate::models::Credential {
        self.store.get()
    }

    /// Last resolved profile, if any.
    pub fn profile(&self) -> Option<Profile> {
        self.profile.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Subscribe to state changes. Guards re-evaluate when the receiver
    /// reports a change; no polling.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn set_profile(&self, profile: Option<Profile>) {
        *self.profile.write().unwrap_or_else(|e| e.into_inner()) = profile;
    }

    fn publish(&self) -> SessionState {
        let state = self.state();
        self.state_tx.send_replace(state);
        state
    }

    /// Record a successful login. An embedded profile (some backend variants
    /// return one with the token) confirms the flag directly and skips
    /// oracle resolution; otherwise the flag stays unknown and the next
    /// guard evaluation triggers [`Self::ensure_resolved`].
    pub async fn login(&self, token: &str, profile: Option<Profile>) -> SessionState {
        // Serialize behind any in-flight resolution so an outcome fetched
        // for the previous identity cannot land on top of this one.
        let mut done = self.resolved.lock().await;
        self.store.set_token(token);
        match profile {
            Some(profile) => {
                self.store.set_profile_flag(ProfileFlag::Confirmed(true));
                self.set_profile(Some(profile));
            }
            None => {
                // Could be a different account than whatever the previous
                // session cached; force a fresh resolution.
                self.store.set_profile_flag(ProfileFlag::Unknown);
                self.set_profile(None);
            }
        }
        // New identity: any previous resolution is void.
        *done = false;
        drop(done);
        tracing::info!(
            user_id = ?self.store.get().user_id,
            "session login"
        );
        self.publish()
    }

    /// Clear the session entirely. Terminal, no confirmation step.
    pub async fn logout(&self) -> SessionState {
        // Serialize behind any in-flight resolution; otherwise its outcome
        // would be applied to the cleared store, leaving a confirmed flag
        // with no token.
        let mut done = self.resolved.lock().await;
        self.store.clear();
        self.set_profile(None);
        *done = false;
        drop(done);
        tracing::info!("session logout");
        self.publish()
    }

    /// Resolve the profile flag at most once per session.
    ///
    /// Short-circuits when a resolution already completed or the flag is
    /// already confirmed (e.g. cached from a prior session). Applies the
    /// fail-open policy on an indeterminate outcome: assume the profile
    /// exists rather than bounce the user back through profile creation
    /// whenever the backend is flaky. A recorded 404 is ground truth and is
    /// never overridden here.
    pub async fn ensure_resolved(&self) -> SessionState {
        let mut done = self.resolved.lock().await;
        if *done {
            return self.state();
        }

        let credential = self.store.get();
        if credential.token.is_none() {
            // Nothing to resolve for an anonymous visitor; leave the latch
            // unset so a later login resolves normally.
            return self.publish();
        }

        if self.store.profile_flag() == ProfileFlag::Unknown {
            tracing::debug!("resolving profile via backend");
            let outcome = self.oracle.resolve(&credential).await;
            self.apply_outcome(outcome);
        }

        *done = true;
        drop(done);
        self.publish()
    }

    fn apply_outcome(&self, outcome: ProfileOutcome) {
        match outcome {
            ProfileOutcome::Found(profile) => {
                tracing::debug!("profile resolution: found");
                self.store.set_profile_flag(ProfileFlag::Confirmed(true));
                self.set_profile(Some(profile));
            }
            ProfileOutcome::ConfirmedAbsent => {
                tracing::info!("profile resolution: confirmed absent (404)");
                self.store.set_profile_flag(ProfileFlag::Confirmed(false));
            }
            ProfileOutcome::Indeterminate(reason) => {
                if self.store.profile_flag() == ProfileFlag::Confirmed(false) {
                    tracing::warn!(%reason, "profile resolution indeterminate, keeping confirmed-absent");
                } else {
                    tracing::warn!(
                        %reason,
                        "profile resolution indeterminate, assuming profile exists"
                    );
                    self.store.set_profile_flag(ProfileFlag::Confirmed(true));
                }
            }
        }
    }

    /// Record a freshly created or updated profile. No oracle round-trip.
    pub fn mark_profile_created(&self, profile: Profile) -> SessionState {
        self.store.set_profile_flag(ProfileFlag::Confirmed(true));
        self.set_profile(Some(profile));
        tracing::info!("profile marked created");
        self.publish()
    }

    /// The backend rejected our bearer token on some authenticated call.
    /// Fatal for the session: clear credentials and force anonymous so the
    /// guards redirect to login. Surfaced, never retried.
    pub async fn handle_unauthorized(&self) -> SessionState {
        tracing::warn!("backend reported unauthorized, clearing session");
        // Same ordering as logout: teardown waits for any in-flight
        // resolution before clearing.
        let mut done = self.resolved.lock().await;
        self.store.clear();
        self.set_profile(None);
        *done = false;
        drop(done);
        self.publish()
    }
}

/// Convenience flows over the REST client, used directly by the host pages.
/// A failed call here never corrupts previously cached session state.
impl<S> SessionController<S, ApiClient>
where
    S: CredentialStore,
{
    /// Register, then establish the session from the returned token.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SessionState, SessionError> {
        let response = self.oracle.signup(email, password).await?;
        Ok(self.login(&response.token, response.profile).await)
    }

    /// Authenticate, then establish the session from the returned token.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionState, SessionError> {
        let response = self.oracle.login(email, password).await?;
        Ok(self.login(&response.token, response.profile).await)
    }

    /// Submit a new profile and confirm the flag on success.
    pub async fn create_profile(&self, draft: &ProfileDraft) -> Result<Profile, SessionError> {
        self.submit_profile(draft, false).await
    }

    /// Update the existing profile; the confirmed flag is refreshed on
    /// success.
    pub async fn update_profile(&self, draft: &ProfileDraft) -> Result<Profile, SessionError> {
        self.submit_profile(draft, true).await
    }

    async fn submit_profile(
        &self,
        draft: &ProfileDraft,
        update: bool,
    ) -> Result<Profile, SessionError> {
        draft
            .validate()
            .map_err(|e| SessionError::BadRequest(e.to_string()))?;

        let token = self
            .store
            .get()
            .token
            .ok_or(SessionError::Unauthorized)?;

        let result = if update {
            self.oracle.update_profile(&token, draft).await
        } else {
            self.oracle.create_profile(&token, draft).await
        };

        match result {
            Ok(profile) => {
                self.mark_profile_created(profile.clone());
                Ok(profile)
            }
            Err(e) if e.is_unauthorized() => {
                self.handle_unauthorized().await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
