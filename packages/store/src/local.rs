//! # Browser `localStorage` store — web-side persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`] implementation used on the **web
//! platform**. Every call goes straight to `window.localStorage`, which is
//! synchronous and survives reloads.
//!
//! ## Error handling
//!
//! All methods swallow errors. Private browsing modes and exceeded quotas make
//! `localStorage` throw; the provider then behaves as if nothing was persisted
//! instead of breaking the page. `clear` wipes the whole origin's storage, not
//! only the provider's keys.

use web_sys::Storage;

use crate::kv::KeyValueStore;

/// `localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: String) {
        let Some(storage) = self.storage() else {
            tracing::warn!("localStorage unavailable, dropping {}", key);
            return;
        };
        if storage.set_item(key, &value).is_err() {
            tracing::warn!("localStorage rejected write for {}", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.clear();
        }
    }
}
