// SPDX-License-Identifier: MIT

//! Persistent credential store.
//!
//! Single source of truth for the bearer token, the derived user id, and the
//! cached "has profile" flag. Only the session controller mutates it; guards
//! and views read through the resolver. The persisted key layout matches
//! what the platform has always written to browser storage (`token`,
//! `hasProfile`, `userId`) so existing sessions survive an upgrade.

use crate::models::{decode_subject, Credential, ProfileFlag};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Port for credential persistence used by the session controller.
pub trait CredentialStore: Send + Sync {
    /// Never fails; absent fields read as `None`.
    fn get(&self) -> Credential;

    /// Store the token and derive the user id from its subject claim. A
    /// payload that fails to decode leaves `user_id` unset but still stores
    /// the token.
    fn set_token(&self, token: &str);

    fn profile_flag(&self) -> ProfileFlag;

    fn set_profile_flag(&self, flag: ProfileFlag);

    /// Remove token, user id, and profile flag with no observable
    /// intermediate state.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct Record {
    token: Option<String>,
    user_id: Option<u64>,
    flag: ProfileFlag,
}

/// In-process credential store.
///
/// Clones share the same underlying record, so a handle can be kept for
/// inspection after another is moved into the controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a persisted key/value snapshot in the browser-storage
    /// layout: `token`, `hasProfile` (`"true"`/`"false"`, absent = unknown),
    /// `userId` (decimal string).
    ///
    /// A `hasProfile` value without a token is stale and is dropped, keeping
    /// the no-token-implies-unknown invariant.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut token = None;
        let mut user_id = None;
        let mut flag = ProfileFlag::Unknown;

        for (key, value) in entries {
            match key.as_str() {
                "token" => token = Some(value),
                "userId" => user_id = value.parse().ok(),
                "hasProfile" => {
                    flag = match value.as_str() {
                        "true" => ProfileFlag::Confirmed(true),
                        "false" => ProfileFlag::Confirmed(false),
                        _ => ProfileFlag::Unknown,
                    }
                }
                _ => {}
            }
        }

        if token.is_none() {
            user_id = None;
            flag = ProfileFlag::Unknown;
        } else if user_id.is_none() {
            // Older sessions may predate the userId key.
            user_id = token.as_deref().and_then(decode_subject);
        }

        Self {
            inner: Arc::new(RwLock::new(Record { token, user_id, flag })),
        }
    }

    /// Key/value snapshot in the persisted layout, for hosts that sync the
    /// store back to durable browser storage.
    pub fn entries(&self) -> Vec<(String, String)> {
        let record = self.read();
        let mut out = Vec::new();
        if let Some(token) = &record.token {
            out.push(("token".to_string(), token.clone()));
        }
        if let Some(id) = record.user_id {
            out.push(("userId".to_string(), id.to_string()));
        }
        if let ProfileFlag::Confirmed(value) = record.flag {
            out.push(("hasProfile".to_string(), value.to_string()));
        }
        out
    }

    fn read(&self) -> RwLockReadGuard<'_, Record> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Record> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Credential {
        let record = self.read();
        Credential {
            token: record.token.clone(),
            user_id: record.user_id,
        }
    }

    fn set_token(&self, token: &str) {
        let user_id = decode_subject(token);
        if user_id.is_none() {
            tracing::warn!("token subject claim not decodable, user id unavailable");
        }
        let mut record = self.write();
        record.token = Some(token.to_string());
        record.user_id = user_id;
    }

    fn profile_flag(&self) -> ProfileFlag {
        self.read().flag
    }

    fn set_profile_flag(&self, flag: ProfileFlag) {
        self.write().flag = flag;
    }

    fn clear(&self) {
        let mut record = self.write();
        *record = Record::default();
    }
}
