//! Shared data models for the portal client and API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- Configuration ---

/// Remote configuration document as returned by the config endpoint.
pub type ConfigPayload = Map<String, Value>;

/// Application configuration assembled from the remote payload.
///
/// Keys are open-ended; merging is shallow, so a nested object in a later
/// payload replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfig {
    entries: Map<String, Value>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every key of `payload` into the config, overwriting existing keys.
    pub fn merge(&mut self, payload: ConfigPayload) {
        for (key, value) in payload {
            self.entries.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Typed lookup. Returns `None` when the key is missing or has another shape.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

// --- Viewport ---

/// Axis reported by the dimension-change notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WIDTH" => Ok(Dimension::Width),
            "HEIGHT" => Ok(Dimension::Height),
            other => Err(format!("unknown dimension: {other}")),
        }
    }
}

/// Last known size of the browser viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportDetails {
    #[serde(rename = "WIDTH")]
    pub width: Option<u32>,
    #[serde(rename = "HEIGHT")]
    pub height: Option<u32>,
}

impl ViewportDetails {
    pub fn set(&mut self, dimension: Dimension, value: u32) {
        match dimension {
            Dimension::Width => self.width = Some(value),
            Dimension::Height => self.height = Some(value),
        }
    }
}

// --- Identity ---

/// Profile of the signed-in user as held by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub token: Option<String>,
    pub fullname: String,
}

/// Body of the profile endpoint. Fields other than `fullname` are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub fullname: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// --- Navigation ---

/// Lifecycle signal emitted by the router around a route transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Start { url: String },
    End { url: String },
}
