//! This crate contains the data provider's UI glue for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}
pub mod brands {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

mod data;
pub use data::{use_data, DataContext, DataProvider};

mod storage;
pub use storage::make_storage;

mod loading;
pub use loading::Loading;

mod auth;
pub use auth::{SignInButton, SignOutButton};

mod user_badge;
pub use user_badge::UserBadge;

pub use api::{AuthOutcome, DataServices, DataState};
