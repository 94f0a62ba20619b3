//! Platform storage constructor for the data provider.
//!
//! Returns a [`store::KeyValueStore`] suited to the build target:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStore`]
//! - **Desktop / Mobile** (native): one file per key via [`store::FileStore`]
//! - **WASM without `web`**: an in-memory store, nothing survives a reload

use std::rc::Rc;

use store::{DataConfig, KeyValueStore};

/// Create the platform-appropriate key-value store.
///
/// On native targets the files live in `<data_dir>/<config.storage.app_dir>/`.
pub fn make_storage(config: &DataConfig) -> Rc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let _ = config;
        Rc::new(store::LocalStore::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        let _ = config;
        Rc::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(&config.storage.app_dir);
        Rc::new(store::FileStore::new(base))
    }
}
