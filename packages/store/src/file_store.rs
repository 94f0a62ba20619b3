//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key as a
//! file under a base directory. It is used on desktop and mobile platforms so the
//! signed-in user and the last fetched collections survive app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── %40app%3Auser            # JSON for "@app:user"
//! ├── %40app%3Atransactions
//! └── ...
//! ```
//!
//! Key characters outside `[A-Za-z0-9._-]` are written as `%XX` so that keys such
//! as `"@app:user"` map to names every platform accepts.
//!
//! ## Platform data directories
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/<app_dir>/` |
//! | Linux | `~/.local/share/<app_dir>/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\<app_dir>\` |
//! | Android | App-internal storage (via `dirs`) |

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(escape_key(key))
    }
}

/// Map a storage key to a filesystem-safe file name.
fn escape_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            name.push(byte as char);
        } else {
            let _ = write!(name, "%{byte:02X}");
        }
    }
    name
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: String) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.key_path(key), value) {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", key, e),
        }
    }

    fn clear(&self) {
        match std::fs::remove_dir_all(&self.base) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to clear {}: {}", self.base.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KeyValueStoreExt;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("finapp_test_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key("@app:user"), "%40app%3Auser");
        assert_eq!(escape_key("plain-key_1.json"), "plain-key_1.json");
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_dir("roundtrip");

        let store = FileStore::new(dir.clone());
        store.save("@app:rehydrate", &1_700_000_000_000i64);

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.load::<i64>("@app:rehydrate"), Some(1_700_000_000_000));

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_remove_and_clear() {
        let dir = temp_dir("clear");

        let store = FileStore::new(dir.clone());
        store.set("@app:user", "{}".to_string());
        store.set("@app:banks", "[]".to_string());

        store.remove("@app:user");
        assert!(store.get("@app:user").is_none());
        assert!(store.get("@app:banks").is_some());

        store.clear();
        assert!(store.get("@app:banks").is_none());
        assert!(!dir.exists());

        // Clearing an absent directory is fine
        store.clear();
    }

    #[test]
    fn test_file_store_remove_missing_key() {
        let dir = temp_dir("remove_missing");

        let store = FileStore::new(dir.clone());
        store.set("@app:cards", "[]".to_string());

        // Absent key and absent directory are both no-ops
        store.remove("@app:user");
        assert_eq!(store.get("@app:cards").as_deref(), Some("[]"));
        store.clear();
        store.remove("@app:cards");
        assert!(!dir.exists());
    }
}
