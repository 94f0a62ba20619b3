use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::DocumentDb;
use crate::error::{ApiError, Result};

/// In-memory DocumentDb for tests and offline fallback.
#[derive(Debug, Default)]
pub struct MemoryDb {
    documents: RefCell<HashMap<(String, String), Value>>,
    fail_with: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document without counting it as a write.
    pub fn insert(&self, collection: &str, id: &str, value: Value) {
        self.documents
            .borrow_mut()
            .insert((collection.to_string(), id.to_string()), value);
    }

    /// Read a document synchronously.
    pub fn document(&self, collection: &str, id: &str) -> Option<Value> {
        self.documents
            .borrow()
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
    }

    /// Number of `set_document` calls that succeeded.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Make every call fail with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.fail_with.borrow_mut() = message.map(str::to_string);
    }

    fn check(&self) -> Result<()> {
        match self.fail_with.borrow().as_ref() {
            Some(message) => Err(ApiError::Database(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl DocumentDb for MemoryDb {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.check()?;
        Ok(self.document(collection, id))
    }

    async fn set_document(&self, collection: &str, id: &str, value: Value) -> Result<()> {
        self.check()?;
        self.insert(collection, id, value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_and_set_document() {
        let db = MemoryDb::new();

        assert!(db.get_document("users", "u1").await.unwrap().is_none());

        db.set_document("users", "u1", json!({"uid": "u1"}))
            .await
            .unwrap();

        let doc = db.get_document("users", "u1").await.unwrap();
        assert_eq!(doc, Some(json!({"uid": "u1"})));
        assert_eq!(db.writes(), 1);

        // Collections are separate namespaces
        assert!(db.get_document("cards", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let db = MemoryDb::new();
        db.set_failure(Some("offline"));

        let err = db.get_document("users", "u1").await.unwrap_err();
        assert!(matches!(err, ApiError::Database(ref m) if m == "offline"));

        db.set_failure(None);
        assert!(db.get_document("users", "u1").await.is_ok());
    }
}
