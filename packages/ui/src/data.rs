//! Data context: the provider component, the hook, and the Dioxus task spawner.

use std::rc::Rc;

use api::{
    ApiError, AuthOutcome, Bank, Card, DataConfig, DataServices, DataState, DataStore,
    LocalBoxFuture, Spawner, Transaction, UserRecord,
};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::loading::Loading;

/// Runs the provider's background work on the Dioxus executor.
struct DioxusSpawner;

impl Spawner for DioxusSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        // Detached from any scope so a reload finishes even if the caller unmounts.
        let _ = spawn_forever(task);
    }
}

/// Data context shared with every descendant of [`DataProvider`].
///
/// Getters read the store directly, so a value set in a handler is visible
/// on the next line. They also subscribe the calling component to the
/// mirrored signal, which re-renders it on any change.
#[derive(Clone)]
pub struct DataContext {
    store: DataStore,
    state: Signal<DataState>,
}

impl DataContext {
    fn current<T>(&self, f: impl FnOnce(&DataState) -> T) -> T {
        // Subscribe to changes, but answer from the store
        let _ = self.state.read();
        self.store.read(f)
    }

    /// Whether a user is signed in.
    pub fn signed(&self) -> bool {
        self.current(|state| state.signed())
    }

    pub fn user(&self) -> UserRecord {
        self.current(|state| state.user.clone())
    }

    pub fn set_user(&self, user: UserRecord) {
        self.store.set_user(user);
    }

    /// Run the Google pop-up sign-in. The outcome carries the route to navigate to.
    pub async fn sign_in_google(&self) -> Result<AuthOutcome, ApiError> {
        self.store.sign_in_google().await
    }

    /// Sign out and wipe local storage. The outcome carries the route to navigate to.
    pub async fn logout(&self) -> Result<AuthOutcome, ApiError> {
        self.store.logout().await
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.current(|state| state.transactions.clone())
    }

    pub fn cards(&self) -> Vec<Card> {
        self.current(|state| state.cards.clone())
    }

    pub fn banks(&self) -> Vec<Bank> {
        self.current(|state| state.banks.clone())
    }

    pub fn set_rehydrated(&self, token: i64) {
        self.store.set_rehydrated(token);
    }

    /// Re-fetch the domain collections now.
    pub fn rehydrate(&self) {
        self.store.rehydrate();
    }

    /// The whole state as a signal, for components that read several slots.
    pub fn state(&self) -> Signal<DataState> {
        self.state
    }
}

/// Get the data context.
/// Panics outside of a [`DataProvider`].
pub fn use_data() -> DataContext {
    use_context::<DataContext>()
}

/// Provider component that hydrates persisted state and keeps domain data fresh.
///
/// The store is built once from the first `services`. Passing a different
/// `db` handle later switches the database and reloads; the other services are
/// fixed for the lifetime of the provider.
#[component]
pub fn DataProvider(
    services: DataServices,
    #[props(default)] config: DataConfig,
    children: Element,
) -> Element {
    let store = use_hook(|| {
        let store = DataStore::new(config.clone(), services.clone(), Rc::new(DioxusSpawner));
        store.mount();
        store
    });

    let mut state = use_signal(|| store.snapshot());

    // Mirror every store change into the signal
    use_hook(|| {
        let mut changes = store.subscribe();
        spawn(async move {
            state.set(changes.borrow_and_update().clone());
            while changes.changed().await.is_ok() {
                let next = changes.borrow_and_update().clone();
                state.set(next);
            }
        });
    });

    let db = services.db.clone();
    use_effect(use_reactive((&db,), {
        let store = store.clone();
        move |(db,)| store.set_database(db)
    }));

    use_context_provider(|| DataContext {
        store: store.clone(),
        state,
    });

    rsx! {
        SuspenseBoundary {
            fallback: |_| rsx! { Loading {} },
            {children}
        }
    }
}
