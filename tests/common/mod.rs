// SPDX-License-Identifier: MIT

//! Shared test fixtures.

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sportify_session::{Credential, Profile, ProfileOracle, ProfileOutcome};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// JWT-shaped token whose subject claim is `id`.
pub fn jwt_for_user(id: u64) -> String {
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{id}"}}"#));
    format!("header.{payload}.sig")
}

pub fn sample_profile() -> Profile {
    Profile {
        id: Some(1),
        first_name: "Alex".to_string(),
        last_name: "Morgan".to_string(),
        age: 27,
        gender: "Female".to_string(),
        sports: vec!["Soccer".to_string(), "Tennis".to_string()],
    }
}

/// Oracle that replays a scripted queue of outcomes and records call counts.
///
/// Clones share state, so tests can keep a handle for assertions after
/// moving one into the controller. An exhausted script keeps answering
/// `Indeterminate`, which doubles as the "backend is down on every call"
/// fixture.
#[derive(Clone)]
pub struct ScriptedOracle {
    outcomes: Arc<Mutex<VecDeque<ProfileOutcome>>>,
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl ScriptedOracle {
    pub fn new(outcomes: Vec<ProfileOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Simulate network latency so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileOracle for ScriptedOracle {
    async fn resolve(&self, _credential: &Credential) -> ProfileOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcomes
            .lock()
            .expect("outcomes mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| ProfileOutcome::Indeterminate("script exhausted".to_string()))
    }
}
