//! Portal Client - Dioxus web application
//!
//! Bootstraps the portal front end: loads remote configuration, tags the
//! document with the device class, guards routes on the session token and
//! loads the signed-in user's profile.

pub mod logging;
pub mod storage;

pub mod api_client;
pub mod app;
pub mod bootstrap;
pub mod context;
pub mod device;
pub mod reporting;
pub mod router;
pub mod services;
pub mod settings;
pub mod stores;
pub mod viewport;

pub mod components;
pub mod routes;
pub mod views;

pub use app::{App, PortalApp};
pub use bootstrap::{BootstrapController, Collaborators};
pub use context::BootstrapContext;
pub use router::AppRouter;
pub use routes::Route;
