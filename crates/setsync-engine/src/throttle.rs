//! Throttle flag storage.
//!
//! A keyed flag with TTL expiry gates the full-sync pass to one run per
//! window. The store is injected so tests run deterministically without an
//! external key/value facility.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Process-wide keyed flags with TTL expiry.
///
/// Implementations back this with whatever the deployment has (an external
/// key/value store in production). Get-then-set atomicity is the
/// implementation's concern.
#[async_trait]
pub trait ThrottleStore: Send + Sync {
    /// Current value for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration);
}

/// In-memory throttle store for tests and single-process deployments.
pub struct InMemoryThrottleStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemoryThrottleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryThrottleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThrottleStore for InMemoryThrottleStore {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, deadline)) if Instant::now() < *deadline => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }
}
