//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{AppShell, Auth, Landing, Main, NotFound, Settings};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // Every page goes through the shell, which runs the navigation guard
    #[layout(AppShell)]
        #[route("/")]
        Landing {},
        #[route("/auth")]
        Auth {},
        #[route("/main")]
        Main {},
        #[route("/settings")]
        Settings {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}
