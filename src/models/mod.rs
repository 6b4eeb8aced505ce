// SPDX-License-Identifier: MIT

//! Data models for the session engine.

pub mod credential;
pub mod profile;

pub use credential::{decode_subject, Credential, ProfileFlag};
pub use profile::{Profile, ProfileDraft};
