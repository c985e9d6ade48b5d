//! Sign-in page.

use dioxus::prelude::*;
use portal_shared::LoginRequest;

use crate::app::PortalApp;
use crate::components::ui::{Button, InputType, TextInput};
use crate::Route;

#[component]
pub fn Auth() -> Element {
    let app = use_context::<PortalApp>();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *submitting.read() {
            return;
        }

        let request = LoginRequest {
            username: username.read().trim().to_string(),
            password: password.read().clone(),
        };
        if request.username.is_empty() || request.password.is_empty() {
            error.set(Some("Enter your username and password".to_string()));
            return;
        }

        submitting.set(true);
        error.set(None);

        let app = app.clone();
        spawn(async move {
            match app.auth.login(&request).await {
                Ok(response) => {
                    if app.tokens.store(&response.token) {
                        app.controller.fetch_user_profile().await;
                        nav.push(Route::Main {});
                    } else {
                        crate::log_error!("failed to persist session token");
                        error.set(Some("Could not save your session".to_string()));
                    }
                }
                Err(e) => {
                    crate::log_warn!("sign-in failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        section { class: "page auth",
            h1 { "Sign in" }
            form { onsubmit: on_submit,
                TextInput {
                    value: username.read().clone(),
                    placeholder: "Username".to_string(),
                    oninput: move |e: FormEvent| username.set(e.value()),
                }
                TextInput {
                    value: password.read().clone(),
                    placeholder: "Password".to_string(),
                    input_type: InputType::Password,
                    oninput: move |e: FormEvent| password.set(e.value()),
                }
                if let Some(message) = error.read().as_ref() {
                    p { class: "form-error", "{message}" }
                }
                Button { r#type: "submit".to_string(), disabled: *submitting.read(),
                    if *submitting.read() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
