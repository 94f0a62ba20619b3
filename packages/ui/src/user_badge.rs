//! Signed-in user indicator for headers and sidebars.

use dioxus::prelude::*;

use crate::data::use_data;
use crate::icons::{FaUser, FaUserSlash};
use crate::Icon;

/// Avatar and name of the signed-in user, or a muted icon when signed out.
#[component]
pub fn UserBadge() -> Element {
    let data = use_data();
    let user = data.user();

    if user.is_empty() {
        return rsx! {
            span {
                class: "user-badge user-badge--anonymous",
                title: "Not signed in",
                Icon { icon: FaUserSlash, width: 14, height: 14 }
            }
        };
    }

    let name = user.display_name().to_string();

    rsx! {
        span {
            class: "user-badge",
            title: "{name}",
            if let Some(avatar) = user.avatar.clone() {
                img { class: "user-badge__avatar", src: "{avatar}", alt: "" }
            } else {
                Icon { icon: FaUser, width: 14, height: 14 }
            }
            span { class: "user-badge__name", "{name}" }
        }
    }
}
