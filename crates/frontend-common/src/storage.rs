//! `window.localStorage` adapter

use mentorhub_core::{KeyValueStore, SharedStore};
use std::sync::Arc;
use web_sys::Storage;

/// Store backed by `localStorage`. The storage object is looked up on every
/// call; without a window (or with storage disabled) reads are empty and
/// writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn shared() -> SharedStore {
        Arc::new(Self)
    }

    /// Whether `localStorage` is reachable in this context
    pub fn is_available() -> bool {
        local_storage().is_some()
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.set_item(key, value) {
                tracing::warn!(key, ?err, "localStorage write failed");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
