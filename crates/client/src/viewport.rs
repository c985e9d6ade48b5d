//! Browser resize notifier feeding the bootstrap controller.

use std::rc::Rc;

use dioxus::prelude::*;
use portal_shared::ViewportDetails;

use crate::bootstrap::BootstrapController;

/// Report the window size now and on every `resize` event.
///
/// The listener lives as long as the page; it is never removed.
#[cfg(target_arch = "wasm32")]
pub fn install_resize_listener(controller: Rc<BootstrapController>, mut viewport: Signal<ViewportDetails>) {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };

    let mut report = move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(width) = window.inner_width().ok().and_then(|v| v.as_f64()) {
            controller.on_dimension_changed("WIDTH", width as u32);
        }
        if let Some(height) = window.inner_height().ok().and_then(|v| v.as_f64()) {
            controller.on_dimension_changed("HEIGHT", height as u32);
        }
        viewport.set(controller.context().viewport());
    };
    report();

    let onresize = Closure::wrap(Box::new(move |_: web_sys::Event| report()) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(e) = window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref()) {
        crate::log_warn!("failed to register resize listener: {:?}", e);
    }
    onresize.forget();
}

/// Desktop windows report no size; the viewport keeps whatever it has.
#[cfg(not(target_arch = "wasm32"))]
pub fn install_resize_listener(controller: Rc<BootstrapController>, mut viewport: Signal<ViewportDetails>) {
    viewport.set(controller.context().viewport());
}
