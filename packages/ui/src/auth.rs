//! Sign-in and sign-out buttons bound to the data context.

use dioxus::prelude::*;

use crate::brands::FaGoogle;
use crate::data::use_data;
use crate::Icon;

/// Button running the Google pop-up sign-in.
///
/// `onredirect` receives the route chosen by the provider: the account page for
/// onboarded users, the onboarding flow for new ones, home when the pop-up was
/// dismissed.
#[component]
pub fn SignInButton(
    #[props(default = "Sign in with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    onredirect: EventHandler<String>,
) -> Element {
    let data = use_data();
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let data = data.clone();
        async move {
            if loading() {
                return;
            }
            loading.set(true);
            match data.sign_in_google().await {
                Ok(outcome) => {
                    if !outcome.success {
                        tracing::warn!("Sign-in returned no user");
                        loading.set(false);
                    }
                    onredirect.call(outcome.redirect);
                }
                Err(e) => {
                    tracing::error!("Failed to sign in: {}", e);
                    loading.set(false);
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            Icon { icon: FaGoogle, width: 14, height: 14 }
            if loading() {
                "Signing in..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to sign the current user out.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    onredirect: EventHandler<String>,
) -> Element {
    let data = use_data();
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let data = data.clone();
        async move {
            if loading() {
                return;
            }
            loading.set(true);
            match data.logout().await {
                Ok(outcome) => onredirect.call(outcome.redirect),
                Err(e) => {
                    tracing::error!("Failed to sign out: {}", e);
                    loading.set(false);
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            if loading() {
                "Signing out..."
            } else {
                "{label}"
            }
        }
    }
}
