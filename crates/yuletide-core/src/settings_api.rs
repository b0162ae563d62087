//! Stateless settings endpoint.
//!
//! `get` reports the server-side defaults and `update` acknowledges without
//! storing anything. Durable settings live only in the [`PreferenceStore`].
//!
//! [`PreferenceStore`]: crate::storage::PreferenceStore

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::themes::ThemeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub year: i32,
    pub theme: String,
    pub snow_intensity: u8,
    pub music_volume: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow_intensity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_volume: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSettingsResponse {
    pub success: bool,
}

pub struct SettingsEndpoint<C: Clock> {
    clock: C,
}

impl<C: Clock> SettingsEndpoint<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn get(&self) -> SettingsResponse {
        SettingsResponse {
            year: self.clock.now().year(),
            theme: ThemeId::default().as_str().to_string(),
            snow_intensity: 50,
            music_volume: 50,
        }
    }

    /// Always succeeds. Nothing is persisted.
    pub fn update(&self, request: &UpdateSettingsRequest) -> UpdateSettingsResponse {
        tracing::debug!(?request, "settings update acknowledged");
        UpdateSettingsResponse { success: true }
    }
}
