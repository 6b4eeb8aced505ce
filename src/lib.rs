// SPDX-License-Identifier: MIT

//! Sportify session engine
//!
//! Client-side session/profile authorization for the Sportify sports meetup
//! platform. From a persisted bearer token, a cached "has profile" flag, and
//! live backend responses, this crate decides whether a visitor should see
//! the login page, the profile-creation page, or the authenticated
//! application -- and keeps that decision consistent across reloads, failed
//! network calls, and concurrent route evaluations.
//!
//! The host UI consumes a single integration point, [`SessionController`],
//! and renders whatever the route guards in [`guard`] decide.

pub mod config;
pub mod controller;
pub mod error;
pub mod guard;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod services;
pub mod store;

pub use config::Config;
pub use controller::SessionController;
pub use error::{Result, SessionError};
pub use guard::{auth_guard, profile_guard, GuardDecision, Route};
pub use models::{Credential, Profile, ProfileDraft, ProfileFlag};
pub use resolver::{decide, SessionState};
pub use services::{ApiClient, ProfileOracle, ProfileOutcome};
pub use store::{CredentialStore, MemoryStore};

/// The controller a host application constructs once and shares with every
/// page: in-process credential store, REST-backed profile oracle.
pub type Session = SessionController<store::MemoryStore, services::ApiClient>;
