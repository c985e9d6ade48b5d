//! Read-only view of the loaded configuration and viewport.

use dioxus::prelude::*;

use crate::app::PortalApp;
use crate::Route;

#[component]
pub fn Settings() -> Element {
    let app = use_context::<PortalApp>();
    let context = app.controller.context().clone();

    let entries: Vec<(String, String)> = context
        .config()
        .iter()
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect();
    let viewport = *app.viewport.read();
    let size = match (viewport.width, viewport.height) {
        (Some(w), Some(h)) => format!("{w} x {h}"),
        _ => "unknown".to_string(),
    };
    let previous = context.current_page();

    rsx! {
        section { class: "page settings",
            h1 { "Settings" }
            h2 { "Configuration" }
            if entries.is_empty() {
                p { class: "muted", "The server sent no configuration." }
            }
            dl {
                for (key, value) in entries {
                    dt { key: "{key}", "{key}" }
                    dd { "{value}" }
                }
            }
            h2 { "Display" }
            p { "Viewport: {size}" }
            p { class: "muted", "Current page: {previous}" }
            Link { to: Route::Main {}, "Back" }
        }
    }
}
