//! Outermost layout: runs every route change through the navigation guard
//! and holds page content back until configuration has loaded.

use std::str::FromStr;

use dioxus::prelude::*;

use crate::app::PortalApp;
use crate::stores::{clear_last_error, LAST_ERROR};
use crate::Route;

#[component]
pub fn AppShell() -> Element {
    let app = use_context::<PortalApp>();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let path = route.to_string();

    // Path whose transition completed without a redirect
    let mut settled = use_signal(|| None::<String>);

    let controller = app.controller.clone();
    use_effect(use_reactive((&path,), move |(path,)| {
        match controller.router().transition(&path) {
            Some(target) => match Route::from_str(&target) {
                Ok(next) => {
                    nav.replace(next);
                }
                Err(_) => crate::log_warn!("redirect target {} is not a route", target),
            },
            None => settled.set(Some(path)),
        }
    }));

    let config_ready = *app.config_ready.read();
    let is_settled = settled.read().as_deref() == Some(path.as_str());
    let last_error = LAST_ERROR.read().clone();

    rsx! {
        div { class: "app-root",
            if let Some(message) = last_error {
                div {
                    class: "error-banner",
                    role: "alert",
                    onclick: move |_| clear_last_error(),
                    "{message}"
                }
            }

            if !config_ready {
                div { class: "splash", "Loading..." }
            } else if is_settled {
                Outlet::<Route> {}
            } else {
                div { class: "splash", "Redirecting..." }
            }
        }
    }
}
