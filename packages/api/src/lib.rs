//! # API crate — collaborators and state of the data provider
//!
//! This crate holds everything the data provider does that is not rendering:
//! the interfaces of its external collaborators and the [`DataStore`] that
//! combines them.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Identity provider interface (pop-up sign-in, sign-out) and a scripted in-memory provider |
//! | [`db`] | Document database interface, the pointer-compared [`DbHandle`], and an in-memory database |
//! | [`sdk`] | Domain SDK interface fetching transactions, cards and banks per user |
//! | [`spawn`] | The [`Spawner`] used to detach background work |
//! | [`data`] | [`DataStore`]: hydration, reload cycles, sign-in, sign-out |
//! | [`error`] | [`ApiError`] |
//!
//! All async interfaces are `?Send`: the provider runs on the UI thread.

pub mod auth;
pub mod data;
pub mod db;
pub mod error;
pub mod sdk;
pub mod spawn;

pub use auth::{Identity, IdentityProvider, MemoryIdentity};
pub use data::{AuthOutcome, DataServices, DataState, DataStore};
pub use db::{DbHandle, DocumentDb, MemoryDb};
pub use error::ApiError;
pub use sdk::DomainSdk;
pub use spawn::{LocalBoxFuture, Spawner};

pub use store::{Bank, Card, DataConfig, Transaction, UserRecord};
