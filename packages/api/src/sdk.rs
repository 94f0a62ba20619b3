//! Domain SDK seam: per-user queries for the three domain collections.

use async_trait::async_trait;
use store::{Bank, Card, Transaction};

use crate::db::DbHandle;
use crate::error::Result;

/// Fetches the domain collections of one user from the remote database.
///
/// Each call returns the complete collection; the provider replaces its local
/// copy wholesale.
#[async_trait(?Send)]
pub trait DomainSdk {
    async fn transactions(&self, db: &DbHandle, uid: &str) -> Result<Vec<Transaction>>;
    async fn cards(&self, db: &DbHandle, uid: &str) -> Result<Vec<Card>>;
    async fn banks(&self, db: &DbHandle, uid: &str) -> Result<Vec<Bank>>;
}
