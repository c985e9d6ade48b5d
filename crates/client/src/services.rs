//! Collaborators of the bootstrap controller and their HTTP/storage backends.

use std::rc::Rc;

use async_trait::async_trait;
use portal_shared::{ApiError, ConfigPayload, LoginRequest, LoginResponse, ProfileResponse};
use serde_json::Value;

use crate::api_client::ApiClient;
use crate::settings::ClientSettings;
use crate::storage;

/// Source of the remote configuration document.
#[async_trait(?Send)]
pub trait ConfigSource {
    async fn fetch_config(&self) -> Result<ConfigPayload, ApiError>;
}

/// Synchronous read access to the session token.
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

/// Profile of the user behind the current token.
#[async_trait(?Send)]
pub trait ProfileSource {
    async fn fetch_profile(&self) -> Result<ProfileResponse, ApiError>;
}

/// Sink for errors the UI recovers from but still wants surfaced.
pub trait ErrorReporter {
    fn handle_error(&self, error: &ApiError);
}

/// Config payloads are JSON objects; `null` counts as an empty payload.
pub fn payload_from_value(value: Value) -> Result<ConfigPayload, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigPayload::new()),
        other => Err(ApiError::Deserialize(format!(
            "config payload must be a JSON object, got {other}"
        ))),
    }
}

/// Fetches the configuration with a plain GET.
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    client: ApiClient,
    path: String,
}

impl HttpConfigSource {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            client: ApiClient::new().with_base_url(settings.api_base.clone()),
            path: settings.config_path.clone(),
        }
    }
}

#[async_trait(?Send)]
impl ConfigSource for HttpConfigSource {
    async fn fetch_config(&self) -> Result<ConfigPayload, ApiError> {
        let value: Value = self.client.get_json(&self.path).await?;
        payload_from_value(value)
    }
}

/// Session token persisted through [`storage`].
#[derive(Debug, Clone)]
pub struct StorageTokenSource {
    key: String,
}

impl StorageTokenSource {
    pub fn new(settings: &ClientSettings) -> Self {
        Self { key: settings.token_key.clone() }
    }

    pub fn store(&self, token: &str) -> bool {
        storage::write(&self.key, token)
    }

    pub fn clear(&self) {
        storage::remove(&self.key);
    }
}

impl TokenSource for StorageTokenSource {
    fn token(&self) -> Option<String> {
        storage::read(&self.key)
    }
}

/// Authentication endpoints. The token is read at call time so a fresh
/// sign-in is picked up without rebuilding the service.
#[derive(Clone)]
pub struct HttpAuthService {
    settings: ClientSettings,
    tokens: Rc<dyn TokenSource>,
}

impl HttpAuthService {
    pub fn new(settings: ClientSettings, tokens: Rc<dyn TokenSource>) -> Self {
        Self { settings, tokens }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new()
            .with_base_url(self.settings.api_base.clone())
            .with_bearer(self.tokens.token())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        ApiClient::new()
            .with_base_url(self.settings.api_base.clone())
            .post_json(&self.settings.login_path, request)
            .await
    }
}

#[async_trait(?Send)]
impl ProfileSource for HttpAuthService {
    async fn fetch_profile(&self) -> Result<ProfileResponse, ApiError> {
        self.client().get_json(&self.settings.profile_path).await
    }
}
