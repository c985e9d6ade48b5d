//! Layout components wrapping routed pages.

pub mod app_shell;

pub use app_shell::AppShell;
