//! # Document database seam
//!
//! The remote store is addressed the way document databases are: a collection
//! name plus a document id, holding a JSON value. The provider only needs
//! `get` and `set` on the `users` collection; the domain SDK receives the same
//! handle to run its own queries.
//!
//! ## Handle identity
//!
//! [`DbHandle`] wraps an `Rc<dyn DocumentDb>` and compares by pointer. Swapping
//! the handle for a different connection is therefore observable as a change,
//! which is what triggers a reload in [`crate::DataStore::set_database`].
//!
//! [`MemoryDb`] is the in-process implementation used by tests and offline
//! builds.

mod memory;

pub use memory::MemoryDb;

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Async document storage keyed by (collection, id).
#[async_trait(?Send)]
pub trait DocumentDb {
    /// Fetch a document. `Ok(None)` when it does not exist.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Create or overwrite a document.
    async fn set_document(&self, collection: &str, id: &str, value: Value) -> Result<()>;
}

/// Shared handle to the remote database.
#[derive(Clone)]
pub struct DbHandle(Rc<dyn DocumentDb>);

impl DbHandle {
    pub fn new(db: impl DocumentDb + 'static) -> Self {
        Self(Rc::new(db))
    }
}

impl<T: DocumentDb + 'static> From<Rc<T>> for DbHandle {
    fn from(db: Rc<T>) -> Self {
        Self(db)
    }
}

impl Deref for DbHandle {
    type Target = dyn DocumentDb;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for DbHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DbHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DbHandle")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
