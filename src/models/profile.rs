// SPDX-License-Identifier: MIT

//! Sportify user profile models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User profile as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Backend-assigned profile id
    #[serde(default)]
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub gender: String,
    /// Sports the user is interested in (e.g. "Football", "Tennis")
    #[serde(default)]
    pub sports: Vec<String>,
}

/// Payload for profile creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileDraft {
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(range(min = 13, max = 120))]
    pub age: u8,
    #[validate(length(min = 1, max = 32))]
    pub gender: String,
    #[validate(length(min = 1))]
    pub sports: Vec<String>,
}
