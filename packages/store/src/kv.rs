//! # Key-value persistence — the storage seam of the data provider
//!
//! Every piece of client state the provider keeps (user profile, rehydrate token,
//! domain collections) lives under its own string key in a [`KeyValueStore`].
//! Values are stored as JSON text so the same layout works for browser
//! `localStorage`, a directory of files, or an in-memory map.
//!
//! ## [`KeyValueStore`] trait
//!
//! A synchronous interface with four methods — `get`/`set`/`remove` for single
//! keys and `clear` for wiping everything the backend holds. Implementations live
//! in sibling modules ([`crate::memory`], [`crate::file_store`], and the
//! browser-only `local` module).
//!
//! Backends never fail outward. A read that cannot be served is `None`; a write
//! that cannot be performed is logged at `warn` and dropped. A broken disk or a
//! full quota degrades to "nothing persisted" rather than breaking sign-in.
//!
//! ## Typed access
//!
//! [`KeyValueStoreExt`] adds [`load`](KeyValueStoreExt::load) and
//! [`save`](KeyValueStoreExt::save), which (de)serialise any serde type as JSON.
//! [`StorageKeys`] derives the five slot keys from a namespace (`"@app"` by
//! default, giving `"@app:user"`, `"@app:banks"`, ...).

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Synchronous string key-value storage that survives restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    /// Remove every key held by the backend, not only the provider's own.
    fn clear(&self);
}

/// JSON helpers available on every [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and decode a value. Missing and undecodable values are both `None`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring undecodable value under {}: {}", key, e);
                None
            }
        }
    }

    /// Encode and write a value.
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, raw),
            Err(e) => tracing::warn!("Failed to encode value for {}: {}", key, e),
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// Storage keys for each persisted slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub rehydrate: String,
    pub user: String,
    pub transactions: String,
    pub cards: String,
    pub banks: String,
}

impl StorageKeys {
    /// Derive the slot keys from a namespace such as `"@app"`.
    pub fn new(namespace: &str) -> Self {
        Self {
            rehydrate: format!("{namespace}:rehydrate"),
            user: format!("{namespace}:user"),
            transactions: format!("{namespace}:transactions"),
            cards: format!("{namespace}:cards"),
            banks: format!("{namespace}:banks"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::UserRecord;

    #[test]
    fn test_default_keys() {
        let keys = StorageKeys::default();
        assert_eq!(keys.rehydrate, "@app:rehydrate");
        assert_eq!(keys.user, "@app:user");
        assert_eq!(keys.transactions, "@app:transactions");
        assert_eq!(keys.cards, "@app:cards");
        assert_eq!(keys.banks, "@app:banks");
    }

    #[test]
    fn test_save_and_load_typed() {
        let store = MemoryStore::new();
        let user = UserRecord {
            id: "u1".to_string(),
            name: Some("Ada".to_string()),
            ..Default::default()
        };

        store.save("@app:user", &user);

        let loaded: UserRecord = store.load("@app:user").unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn test_load_missing_or_corrupt() {
        let store = MemoryStore::new();
        assert!(store.load::<UserRecord>("@app:user").is_none());

        store.set("@app:user", "{not json".to_string());
        assert!(store.load::<UserRecord>("@app:user").is_none());
    }

    #[test]
    fn test_ext_on_trait_object() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.save("@app:rehydrate", &42i64);
        assert_eq!(store.load::<i64>("@app:rehydrate"), Some(42));
    }
}
