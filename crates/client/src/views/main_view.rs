//! Home page for a signed-in user.

use dioxus::prelude::*;

use crate::app::PortalApp;
use crate::components::ui::{Button, ButtonVariant};
use crate::stores::{clear_current_profile, CURRENT_PROFILE};
use crate::Route;

#[component]
pub fn Main() -> Element {
    let app = use_context::<PortalApp>();
    let nav = use_navigator();

    let fullname = CURRENT_PROFILE.read().as_ref().map(|p| p.fullname.clone());

    let sign_out = move |_: MouseEvent| {
        app.tokens.clear();
        clear_current_profile();
        nav.push(Route::Auth {});
    };

    rsx! {
        section { class: "page main",
            match fullname {
                Some(name) => rsx! { h1 { "Hello, {name}" } },
                None => rsx! { h1 { "Hello" } p { class: "muted", "Your profile is not available right now." } },
            }
            div { class: "page-links",
                Link { to: Route::Settings {}, "Settings" }
            }
            Button { variant: ButtonVariant::Secondary, onclick: sign_out, "Sign out" }
        }
    }
}
