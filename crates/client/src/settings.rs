//! Client settings: where the API lives and which endpoints to call.

use portal_shared::{normalize_origin, CONFIG_ENDPOINT, LOGIN_ENDPOINT, PROFILE_ENDPOINT, TOKEN_STORAGE_KEY};

/// Settings baked into the client at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Origin of the API. Empty means same origin (relative URLs).
    pub api_base: String,
    pub config_path: String,
    pub profile_path: String,
    pub login_path: String,
    pub token_key: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            config_path: CONFIG_ENDPOINT.to_string(),
            profile_path: PROFILE_ENDPOINT.to_string(),
            login_path: LOGIN_ENDPOINT.to_string(),
            token_key: TOKEN_STORAGE_KEY.to_string(),
        }
    }
}

impl ClientSettings {
    /// Settings from build-time environment variables.
    ///
    /// Web builds have no process environment, so these are read with
    /// `option_env!`:
    /// - `PORTAL_API_BASE`: API host or origin (default: same origin)
    /// - `PORTAL_CONFIG_PATH`: config endpoint (default: `/api/config`)
    /// - `PORTAL_PROFILE_PATH`: profile endpoint (default: `/api/auth/profile`)
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            option_env!("PORTAL_API_BASE"),
            option_env!("PORTAL_CONFIG_PATH"),
            option_env!("PORTAL_PROFILE_PATH"),
        )
    }

    fn with_overrides(
        mut self,
        api_base: Option<&str>,
        config_path: Option<&str>,
        profile_path: Option<&str>,
    ) -> Self {
        if let Some(base) = api_base {
            self.api_base = normalize_origin(base);
        }
        if let Some(path) = config_path.filter(|p| !p.trim().is_empty()) {
            self.config_path = path.to_string();
        }
        if let Some(path) = profile_path.filter(|p| !p.trim().is_empty()) {
            self.profile_path = path.to_string();
        }
        self
    }
}
