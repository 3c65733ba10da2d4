//! Boolean persistence channel over a session store
//!
//! Values are the strings `"true"` and `"false"`. Anything else, a missing
//! entry, or a failing store reads back as "nothing stored".

use std::fmt;
use std::sync::Arc;

use crate::store::SessionStore;
use crate::{Result, StorageError};

const PROBE_KEY: &str = "__unfurl_storage_probe__";

#[derive(Clone, Default)]
pub struct PersistenceChannel {
    store: Option<Arc<dyn SessionStore>>,
}

impl PersistenceChannel {
    /// A channel that stores nothing and restores nothing.
    pub fn disabled() -> Self {
        Self { store: None }
    }

    /// Check that `store` round-trips a value before trusting it. A store that
    /// fails the check yields a disabled channel.
    pub fn probe(store: Arc<dyn SessionStore>) -> Self {
        match round_trip(store.as_ref()) {
            Ok(()) => Self { store: Some(store) },
            Err(e) => {
                tracing::warn!(error = %e, "Session storage unavailable, state will not persist");
                Self::disabled()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn restore(&self, key: &str) -> Option<bool> {
        let store = self.store.as_ref()?;
        match store.get(key) {
            Ok(Some(value)) => match value.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                other => {
                    tracing::debug!(key, value = other, "Ignoring malformed persisted value");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(key, error = %e, "Failed to read persisted state");
                None
            }
        }
    }

    pub fn persist(&self, key: &str, value: bool) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        let value = if value { "true" } else { "false" };
        if let Err(e) = store.set(key, value) {
            tracing::debug!(key, error = %e, "Failed to persist state");
        }
    }
}

fn round_trip(store: &dyn SessionStore) -> Result<()> {
    store.set(PROBE_KEY, PROBE_KEY)?;
    let read = store.get(PROBE_KEY)?;
    store.remove(PROBE_KEY)?;

    if read.as_deref() == Some(PROBE_KEY) {
        Ok(())
    } else {
        Err(StorageError::Unavailable(
            "probe value did not round-trip".to_string(),
        ))
    }
}

impl fmt::Debug for PersistenceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceChannel")
            .field("available", &self.is_available())
            .finish()
    }
}
