//! # DataStore — the data provider's state and actions
//!
//! [`DataStore`] owns everything the UI reads through the data context: the
//! signed-in [`UserRecord`], the rehydrate token, and the three domain
//! collections. It is framework independent; the `ui` crate wraps it in a
//! Dioxus context and mirrors [`DataState`] into a signal.
//!
//! ## Persistence
//!
//! Each slot lives under its own key (see [`store::StorageKeys`]). The store
//! hydrates every slot in [`DataStore::new`] and writes through on every
//! mutation, so the key-value store is the source of truth across restarts.
//!
//! ## Reload cycles
//!
//! Mounting, a new user, a new rehydrate token and a new database handle each
//! start a reload cycle. A cycle takes the next cycle token *synchronously*,
//! then fetches transactions, cards and banks concurrently. Every fetch applies
//! its own result when it resolves, unless a newer cycle has started in the
//! meantime, in which case the result is dropped. A cycle without a user id
//! fetches nothing.
//!
//! ## Actions
//!
//! | Method | Outcome |
//! |--------|---------|
//! | [`sign_in_google`](DataStore::sign_in_google) | `/` without a user, `/app/account` for onboarded users, `/onboarding/bank` otherwise (the remote profile write runs in the background). |
//! | [`logout`](DataStore::logout) | Clears all local storage, ends the provider session, resets the user, returns `/`. |
//!
//! Redirect targets come from [`store::config::RoutesConfig`].

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use serde::Serialize;
use store::{
    current_timestamp_ms, Bank, Card, DataConfig, KeyValueStore, KeyValueStoreExt, StorageKeys,
    Transaction, UserRecord,
};
use tokio::sync::watch;

use crate::auth::IdentityProvider;
use crate::db::DbHandle;
use crate::error::Result;
use crate::sdk::DomainSdk;
use crate::spawn::Spawner;

/// Result of a sign-in or sign-out: whether it succeeded and where to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub redirect: String,
}

impl AuthOutcome {
    pub fn success(redirect: impl Into<String>) -> Self {
        Self {
            success: true,
            redirect: redirect.into(),
        }
    }

    pub fn failure(redirect: impl Into<String>) -> Self {
        Self {
            success: false,
            redirect: redirect.into(),
        }
    }
}

/// Snapshot of every slot the provider exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataState {
    pub rehydrate: i64,
    pub user: UserRecord,
    pub transactions: Vec<Transaction>,
    pub cards: Vec<Card>,
    pub banks: Vec<Bank>,
}

impl DataState {
    /// True iff a non-empty user is present.
    pub fn signed(&self) -> bool {
        !self.user.is_empty()
    }
}

/// External collaborators injected into the provider.
#[derive(Clone)]
pub struct DataServices {
    pub storage: Rc<dyn KeyValueStore>,
    pub identity: Rc<dyn IdentityProvider>,
    pub db: DbHandle,
    pub sdk: Rc<dyn DomainSdk>,
}

impl PartialEq for DataServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
            && Rc::ptr_eq(&self.identity, &other.identity)
            && self.db == other.db
            && Rc::ptr_eq(&self.sdk, &other.sdk)
    }
}

#[derive(Clone, Copy, Debug)]
enum Slot {
    Transactions,
    Cards,
    Banks,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Slot::Transactions => "transactions",
            Slot::Cards => "cards",
            Slot::Banks => "banks",
        }
    }

    fn key(self, keys: &StorageKeys) -> &str {
        match self {
            Slot::Transactions => &keys.transactions,
            Slot::Cards => &keys.cards,
            Slot::Banks => &keys.banks,
        }
    }
}

struct Inner {
    config: DataConfig,
    keys: StorageKeys,
    storage: Rc<dyn KeyValueStore>,
    identity: Rc<dyn IdentityProvider>,
    sdk: Rc<dyn DomainSdk>,
    db: RefCell<DbHandle>,
    spawner: Rc<dyn Spawner>,
    state: watch::Sender<DataState>,
    cycle: Cell<u64>,
}

/// Persisted, reactive client state plus the sign-in/sign-out actions.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DataStore {
    inner: Rc<Inner>,
}

impl DataStore {
    /// Hydrate every slot from `services.storage`.
    ///
    /// Nothing is fetched until [`mount`](Self::mount) is called.
    pub fn new(config: DataConfig, services: DataServices, spawner: Rc<dyn Spawner>) -> Self {
        let keys = config.keys();
        let storage = services.storage;

        let rehydrate = match storage.load(&keys.rehydrate) {
            Some(token) => token,
            None => {
                let token = current_timestamp_ms();
                storage.save(&keys.rehydrate, &token);
                token
            }
        };

        let initial = DataState {
            rehydrate,
            user: storage.load(&keys.user).unwrap_or_default(),
            transactions: storage.load(&keys.transactions).unwrap_or_default(),
            cards: storage.load(&keys.cards).unwrap_or_default(),
            banks: storage.load(&keys.banks).unwrap_or_default(),
        };
        tracing::debug!(signed = initial.signed(), "Hydrated data provider");

        let (state, _) = watch::channel(initial);

        Self {
            inner: Rc::new(Inner {
                config,
                keys,
                storage,
                identity: services.identity,
                sdk: services.sdk,
                db: RefCell::new(services.db),
                spawner,
                state,
                cycle: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> &DataConfig {
        &self.inner.config
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> DataState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<DataState> {
        self.inner.state.subscribe()
    }

    /// Run `f` against the current state without cloning it.
    pub fn read<T>(&self, f: impl FnOnce(&DataState) -> T) -> T {
        f(&self.inner.state.borrow())
    }

    pub fn signed(&self) -> bool {
        self.inner.state.borrow().signed()
    }

    pub fn user(&self) -> UserRecord {
        self.inner.state.borrow().user.clone()
    }

    pub fn database(&self) -> DbHandle {
        self.inner.db.borrow().clone()
    }

    /// Start the initial reload cycle.
    pub fn mount(&self) {
        self.schedule_reload();
    }

    /// Replace the user, writing through to storage. Reloads if the user changed.
    pub fn set_user(&self, user: UserRecord) {
        if user.is_empty() {
            self.inner.storage.remove(&self.inner.keys.user);
        } else {
            self.inner.storage.save(&self.inner.keys.user, &user);
        }

        let changed = self.inner.state.send_if_modified(|state| {
            if state.user == user {
                return false;
            }
            state.user = user;
            true
        });
        if changed {
            self.schedule_reload();
        }
    }

    /// Replace the rehydrate token, writing through to storage. Reloads if it changed.
    pub fn set_rehydrated(&self, token: i64) {
        self.inner.storage.save(&self.inner.keys.rehydrate, &token);

        let changed = self.inner.state.send_if_modified(|state| {
            if state.rehydrate == token {
                return false;
            }
            state.rehydrate = token;
            true
        });
        if changed {
            self.schedule_reload();
        }
    }

    /// Force a reload by moving the rehydrate token to the current time.
    pub fn rehydrate(&self) {
        let current = self.inner.state.borrow().rehydrate;
        let next = match current.checked_add(1) {
            Some(next) => current_timestamp_ms().max(next),
            // Nothing above the ceiling; the clock is still a different value.
            None => current_timestamp_ms(),
        };
        self.set_rehydrated(next);
    }

    /// Point the provider at another database. Reloads if the handle changed.
    pub fn set_database(&self, db: DbHandle) {
        if *self.inner.db.borrow() == db {
            return;
        }
        *self.inner.db.borrow_mut() = db;
        self.schedule_reload();
    }

    fn schedule_reload(&self) {
        let cycle = self.reload();
        self.inner.spawner.spawn(Box::pin(cycle));
    }

    fn begin_cycle(&self) -> u64 {
        let cycle = self.inner.cycle.get() + 1;
        self.inner.cycle.set(cycle);
        cycle
    }

    fn is_stale(&self, cycle: u64) -> bool {
        cycle != self.inner.cycle.get()
    }

    /// Start a reload cycle for the current user.
    ///
    /// The cycle token is taken when this is called, not when the future is
    /// first polled, so a later call always supersedes an earlier one.
    pub fn reload(&self) -> impl Future<Output = ()> + 'static {
        let cycle = self.begin_cycle();
        let user = self.user();
        let this = self.clone();

        async move {
            let Some(uid) = user.uid() else {
                tracing::debug!(cycle, "No signed-in user, skipping reload");
                return;
            };
            if this.is_stale(cycle) {
                tracing::debug!(cycle, "Reload superseded before it started");
                return;
            }

            tracing::debug!(cycle, uid, "Reloading domain data");
            let db = this.database();
            let sdk = this.inner.sdk.clone();

            futures::join!(
                this.load_slot(
                    cycle,
                    Slot::Transactions,
                    sdk.transactions(&db, uid),
                    |state, items| state.transactions = items,
                ),
                this.load_slot(
                    cycle,
                    Slot::Cards,
                    sdk.cards(&db, uid),
                    |state, items| state.cards = items,
                ),
                this.load_slot(
                    cycle,
                    Slot::Banks,
                    sdk.banks(&db, uid),
                    |state, items| state.banks = items,
                ),
            );
        }
    }

    async fn load_slot<T: Serialize>(
        &self,
        cycle: u64,
        slot: Slot,
        fetch: impl Future<Output = Result<Vec<T>>>,
        assign: impl FnOnce(&mut DataState, Vec<T>),
    ) {
        let items = match fetch.await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", slot.name(), e);
                return;
            }
        };

        if self.is_stale(cycle) {
            tracing::debug!(cycle, "Discarding stale {}", slot.name());
            return;
        }

        self.inner.storage.save(slot.key(&self.inner.keys), &items);
        self.inner.state.send_modify(|state| assign(state, items));
    }

    /// Sign in through the identity provider's pop-up and pick a destination.
    pub async fn sign_in_google(&self) -> Result<AuthOutcome> {
        let routes = &self.inner.config.routes;

        let Some(identity) = self.inner.identity.sign_in_with_popup().await? else {
            tracing::info!("Sign-in pop-up returned no user");
            return Ok(AuthOutcome::failure(routes.home.as_str()));
        };

        let mut user = UserRecord::from(identity);
        self.set_user(user.clone());
        tracing::info!(uid = %user.id, "Signed in");

        let db = self.database();
        let collection = self.inner.config.remote.users_collection.clone();
        let profile = db.get_document(&collection, &user.id).await?;

        let onboarded = profile
            .as_ref()
            .and_then(|doc| doc.get("onboarding"))
            .and_then(|flag| flag.as_bool())
            == Some(true);
        if onboarded {
            return Ok(AuthOutcome::success(routes.account.as_str()));
        }

        user.onboarding = Some(false);
        self.set_user(user.clone());

        let document = serde_json::to_value(&user)?;
        self.inner.spawner.spawn(Box::pin(async move {
            if let Err(e) = db.set_document(&collection, &user.id, document).await {
                tracing::error!("Failed to write profile for {}: {}", user.id, e);
            }
        }));

        Ok(AuthOutcome::success(routes.onboarding.as_str()))
    }

    /// Wipe local storage, end the provider session and reset the user.
    pub async fn logout(&self) -> Result<AuthOutcome> {
        self.inner.storage.clear();
        self.inner.identity.sign_out().await?;
        self.set_user(UserRecord::default());
        tracing::info!("Signed out");

        Ok(AuthOutcome::success(self.inner.config.routes.home.as_str()))
    }
}
