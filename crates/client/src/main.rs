//! Portal Client - Main entry point
//!
//! Supports both web (WASM) and desktop platforms.

use portal_client::App;

fn main() {
    portal_client::logging::init();
    dioxus::launch(App);
}
