//! Device classification and the root class list it is written to.

use std::cell::RefCell;
use std::collections::BTreeSet;

pub const CLASS_DEVICE: &str = "device";
pub const CLASS_DESKTOP: &str = "desktop";
pub const CLASS_PHONE: &str = "device-phone";
pub const CLASS_TABLET: &str = "device-tablet";

/// Device capabilities used for styling decisions.
pub trait DeviceDetector {
    fn is_mobile(&self) -> bool;
    fn is_phone(&self) -> bool;
    fn is_tablet(&self) -> bool;
}

/// Root-level class list (the document body in a browser).
pub trait ViewSurface {
    fn add_class(&self, name: &str);
}

/// Add `device` or `desktop`, then the phone/tablet markers for devices.
///
/// Class lists have set semantics, so calling this twice changes nothing.
pub fn classify_device(detector: &dyn DeviceDetector, surface: &dyn ViewSurface) {
    if detector.is_mobile() {
        surface.add_class(CLASS_DEVICE);
        if detector.is_phone() {
            surface.add_class(CLASS_PHONE);
        }
        if detector.is_tablet() {
            surface.add_class(CLASS_TABLET);
        }
    } else {
        surface.add_class(CLASS_DESKTOP);
    }
}

/// Classifies a browser user-agent string.
#[derive(Debug, Clone, Default)]
pub struct UserAgentDetector {
    user_agent: String,
}

impl UserAgentDetector {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self { user_agent: user_agent.into() }
    }

    /// Detector for the running browser.
    #[cfg(target_arch = "wasm32")]
    pub fn from_platform() -> Self {
        let ua = web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default();
        Self::new(ua)
    }

    /// Desktop builds always report a desktop.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_platform() -> Self {
        Self::default()
    }

    fn has(&self, needle: &str) -> bool {
        self.user_agent.contains(needle)
    }
}

impl DeviceDetector for UserAgentDetector {
    fn is_mobile(&self) -> bool {
        self.is_phone() || self.is_tablet()
    }

    fn is_phone(&self) -> bool {
        if self.is_tablet() {
            return false;
        }
        self.has("iPhone")
            || self.has("iPod")
            || (self.has("Android") && self.has("Mobile"))
            || self.has("Windows Phone")
            || self.has("BlackBerry")
            || self.has("Opera Mini")
            || self.has("Mobi")
    }

    fn is_tablet(&self) -> bool {
        self.has("iPad")
            || (self.has("Android") && !self.has("Mobile"))
            || self.has("Tablet")
            || self.has("Silk")
            || self.has("Kindle")
            || self.has("PlayBook")
    }
}

/// Class list kept in memory; used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    classes: RefCell<BTreeSet<String>>,
}

impl MemorySurface {
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }
}

impl ViewSurface for MemorySurface {
    fn add_class(&self, name: &str) {
        self.classes.borrow_mut().insert(name.to_string());
    }
}

/// `document.body.classList`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyClassList;

#[cfg(target_arch = "wasm32")]
impl ViewSurface for BodyClassList {
    fn add_class(&self, name: &str) {
        let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
            crate::log_warn!("no document body; skipping class {}", name);
            return;
        };
        if let Err(e) = body.class_list().add_1(name) {
            crate::log_warn!("failed to add body class {}: {:?}", name, e);
        }
    }
}
