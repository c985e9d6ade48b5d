//! Public landing page.

use dioxus::prelude::*;

use crate::stores::CURRENT_PROFILE;
use crate::Route;

#[component]
pub fn Landing() -> Element {
    let signed_in = CURRENT_PROFILE.read().is_some();

    rsx! {
        section { class: "page landing",
            h1 { "Welcome" }
            if signed_in {
                Link { to: Route::Main {}, "Continue" }
            } else {
                Link { to: Route::Auth {}, "Sign in" }
            }
        }
    }
}
