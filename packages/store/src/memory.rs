use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for testing and as a fallback when no device storage exists.
///
/// Clones share the same map, so a test can keep a handle and inspect what the
/// provider wrote through.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }

    fn clear(&self) {
        self.entries().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();

        // Initially empty
        assert!(store.is_empty());
        assert!(store.get("@app:user").is_none());

        store.set("@app:user", "{}".to_string());
        assert_eq!(store.get("@app:user").as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);

        // Overwrite replaces
        store.set("@app:user", "{\"uid\":\"1\"}".to_string());
        assert_eq!(store.get("@app:user").as_deref(), Some("{\"uid\":\"1\"}"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.set("a", "1".to_string());
        store.set("b", "2".to_string());

        store.remove("a");

        assert!(store.get("a").is_none());
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_clear_removes_foreign_keys() {
        let store = MemoryStore::new();
        store.set("@app:user", "{}".to_string());
        store.set("theme", "\"dark\"".to_string());

        store.clear();

        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("@app:cards", "[]".to_string());

        assert_eq!(handle.get("@app:cards").as_deref(), Some("[]"));
    }
}
