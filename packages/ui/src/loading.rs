use dioxus::prelude::*;

use crate::icons::FaSpinner;
use crate::Icon;

/// Fallback shown while a descendant of the data provider is suspended.
#[component]
pub fn Loading() -> Element {
    rsx! {
        div {
            class: "loading",
            role: "status",
            Icon { icon: FaSpinner, width: 24, height: 24, class: "loading__spinner" }
            span { class: "loading__label", "Loading..." }
        }
    }
}
