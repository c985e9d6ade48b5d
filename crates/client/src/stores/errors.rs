//! Last user-facing error, shown by the application shell.

use dioxus::prelude::*;

pub static LAST_ERROR: GlobalSignal<Option<String>> = Signal::global(|| None);

pub fn set_last_error(message: String) {
    *LAST_ERROR.write() = Some(message);
}

pub fn clear_last_error() {
    *LAST_ERROR.write() = None;
}
