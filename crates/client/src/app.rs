//! Root component: builds the controller and its collaborators once per load.

use std::rc::Rc;

use dioxus::prelude::*;
use portal_shared::ViewportDetails;

use crate::bootstrap::{BootstrapController, Collaborators};
use crate::context::BootstrapContext;
use crate::device::UserAgentDetector;
use crate::reporting::LogErrorReporter;
use crate::router::AppRouter;
use crate::routes::Route;
use crate::services::{HttpAuthService, HttpConfigSource, StorageTokenSource};
use crate::settings::ClientSettings;
use crate::stores::SignalProfileStore;
use crate::viewport::install_resize_listener;

/// Handles shared with every view through context.
#[derive(Clone)]
pub struct PortalApp {
    pub settings: ClientSettings,
    pub controller: Rc<BootstrapController>,
    pub tokens: Rc<StorageTokenSource>,
    pub auth: Rc<HttpAuthService>,
    /// Mirrors `BootstrapContext::is_config_loaded` for rendering.
    pub config_ready: Signal<bool>,
    pub viewport: Signal<ViewportDetails>,
}

impl PortalApp {
    pub fn new(
        settings: ClientSettings,
        config_ready: Signal<bool>,
        viewport: Signal<ViewportDetails>,
    ) -> Self {
        let tokens = Rc::new(StorageTokenSource::new(&settings));
        let auth = Rc::new(HttpAuthService::new(settings.clone(), tokens.clone()));

        let controller = BootstrapController::new(
            Rc::new(BootstrapContext::new()),
            AppRouter::new(),
            Collaborators {
                config: Rc::new(HttpConfigSource::new(&settings)),
                tokens: tokens.clone(),
                profiles: auth.clone(),
                store: Rc::new(SignalProfileStore),
                errors: Rc::new(LogErrorReporter),
                device: Rc::new(UserAgentDetector::from_platform()),
                surface: surface(),
            },
        );

        Self { settings, controller, tokens, auth, config_ready, viewport }
    }
}

#[cfg(target_arch = "wasm32")]
fn surface() -> Rc<dyn crate::device::ViewSurface> {
    Rc::new(crate::device::BodyClassList)
}

#[cfg(not(target_arch = "wasm32"))]
fn surface() -> Rc<dyn crate::device::ViewSurface> {
    Rc::new(crate::device::MemorySurface::default())
}

#[component]
pub fn App() -> Element {
    let config_ready = use_signal(|| false);
    let viewport = use_signal(ViewportDetails::default);
    let app = use_context_provider(|| PortalApp::new(ClientSettings::from_env(), config_ready, viewport));

    use_hook(move || {
        let controller = app.controller.clone();
        if !controller.prepare() {
            return;
        }
        install_resize_listener(controller.clone(), viewport);

        // Pages render as soon as the config is merged; the profile
        // request may still be in flight.
        controller.set_ready_listener(move || {
            let mut ready = config_ready;
            ready.set(true);
        });
        spawn(async move {
            controller.load_configuration().await;
        });
    });

    rsx! {
        Router::<Route> {}
    }
}
