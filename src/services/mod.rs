// SPDX-License-Identifier: MIT

//! Backend service clients.

pub mod api;

pub use api::{ApiClient, LoginResponse, ProfileOracle, ProfileOutcome};
