//! State shared between the bootstrap controller and the views.

use std::cell::{Cell, Ref, RefCell};

use portal_shared::{AppConfig, ConfigPayload, Dimension, ViewportDetails};

/// Configuration, viewport and navigation state for one application load.
///
/// Handed around as `Rc<BootstrapContext>`; only the bootstrap controller
/// writes to it.
#[derive(Debug, Default)]
pub struct BootstrapContext {
    config: RefCell<AppConfig>,
    config_loaded: Cell<bool>,
    viewport: Cell<ViewportDetails>,
    current_page: RefCell<String>,
}

impl BootstrapContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Ref<'_, AppConfig> {
        self.config.borrow()
    }

    /// Merge a config payload and mark the configuration as loaded.
    pub(crate) fn apply_config(&self, payload: ConfigPayload) {
        self.config.borrow_mut().merge(payload);
        self.config_loaded.set(true);
    }

    /// True once the config request has resolved. Never goes back to false.
    pub fn is_config_loaded(&self) -> bool {
        self.config_loaded.get()
    }

    pub fn viewport(&self) -> ViewportDetails {
        self.viewport.get()
    }

    pub(crate) fn set_dimension(&self, dimension: Dimension, value: u32) {
        let mut viewport = self.viewport.get();
        viewport.set(dimension, value);
        self.viewport.set(viewport);
    }

    /// URL of the last completed navigation; empty before the first one.
    pub fn current_page(&self) -> String {
        self.current_page.borrow().clone()
    }

    pub(crate) fn set_current_page(&self, url: &str) {
        *self.current_page.borrow_mut() = url.to_string();
    }
}
