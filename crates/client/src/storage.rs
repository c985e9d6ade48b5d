//! Session persistence.
//!
//! The client only persists short strings (the session token):
//! - Web: `localStorage`
//! - Desktop: one plain-text file per key under the platform config
//!   directory, e.g. `~/.config/portal/portal_token` on Linux.

/// Store `value` under `key`. Returns `true` if it was written.
pub fn write(key: &str, value: &str) -> bool {
    backend::write(key, value)
}

/// Stored value for `key`, with surrounding whitespace removed.
/// Missing or blank entries read as `None`.
pub fn read(key: &str) -> Option<String> {
    non_blank(&backend::read(key)?)
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn remove(key: &str) {
    backend::remove(key);
}

/// File name for `key` that is valid on every desktop platform.
pub fn file_name_for(key: &str) -> String {
    key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}

#[cfg(target_arch = "wasm32")]
mod backend {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn write(key: &str, value: &str) -> bool {
        local_storage().is_some_and(|s| s.set_item(key, value).is_ok())
    }

    pub fn read(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    pub fn remove(key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::path::PathBuf;

    use super::file_name_for;

    fn path_for(key: &str) -> Option<PathBuf> {
        let dir = dirs::config_dir()?.join("portal");
        std::fs::create_dir_all(&dir).ok()?;
        Some(dir.join(file_name_for(key)))
    }

    pub fn write(key: &str, value: &str) -> bool {
        path_for(key).is_some_and(|p| std::fs::write(p, value).is_ok())
    }

    pub fn read(key: &str) -> Option<String> {
        std::fs::read_to_string(path_for(key)?).ok()
    }

    pub fn remove(key: &str) {
        if let Some(path) = path_for(key) {
            let _ = std::fs::remove_file(path);
        }
    }
}
