//! View components for the application.

pub mod auth;
pub mod landing;
pub mod layouts;
pub mod main_view;
pub mod not_found;
pub mod settings;

pub use auth::Auth;
pub use landing::Landing;
pub use layouts::AppShell;
pub use main_view::Main;
pub use not_found::NotFound;
pub use settings::Settings;
