//! User preferences and the local persistence contract.
//!
//! Preferences are a single JSON object under [`SETTINGS_KEY`]. Saving is a
//! read-merge-write of the latest snapshot: only the fields present in the
//! partial overwrite stored ones, everything else is left untouched.
//! Read or parse failures yield defaults and write failures are logged; the
//! in-memory state stays authoritative for the session either way.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::kv::KeyValueStore;
use super::scores::GameScores;
use crate::countdown::TargetSelection;
use crate::games::GameKind;
use crate::notify::NotificationSentState;
use crate::themes::ThemeId;

pub const SETTINGS_KEY: &str = "christmas-countdown-settings";
pub const SCORES_KEY: &str = "christmas-countdown-scores";
pub const GIFTS_KEY: &str = "christmas-gift-planner";
const NOTIFICATION_KEY_PREFIX: &str = "notification-sent-";

const DEFAULT_SNOW_INTENSITY: u8 = 50;
const DEFAULT_MUSIC_VOLUME: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBlindMode {
    None,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

/// Custom text for the three countdown notifications. Blank means "use default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessages {
    #[serde(default)]
    pub one_week: String,
    #[serde(default)]
    pub three_days: String,
    #[serde(default)]
    pub one_day: String,
}

/// Flat settings record. Every field is optional so the same type doubles as
/// a partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow_intensity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_volume: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_music_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_notification_messages: Option<NotificationMessages>,
    /// IANA zone id or "auto". Decorative only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Local wall time. RFC 3339 timestamps written by browsers are accepted
    /// and converted to local time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "local_or_rfc3339"
    )]
    pub target_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_motion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_blind_mode: Option<ColorBlindMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_contrast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_text: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dyslexia_font: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnifier_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_to_speech: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub haptic_feedback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes_only_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_alert_frequency: Option<u32>,
}

fn local_or_rfc3339<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(local) = raw.parse::<NaiveDateTime>() {
        return Ok(Some(local));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| Some(at.with_timezone(&Local).naive_local()))
        .map_err(serde::de::Error::custom)
}

/// Clamp to 0..=100 and snap to the nearest multiple of 10.
pub fn snap_percent(value: u32) -> u8 {
    let clamped = value.min(100);
    (((clamped + 5) / 10) * 10).min(100) as u8
}

impl Preferences {
    pub fn theme(&self) -> ThemeId {
        self.selected_theme
            .as_deref()
            .map(ThemeId::parse_or_default)
            .unwrap_or_default()
    }

    pub fn snow_intensity(&self) -> u8 {
        self.snow_intensity.unwrap_or(DEFAULT_SNOW_INTENSITY)
    }

    pub fn music_volume(&self) -> u8 {
        self.music_volume.unwrap_or(DEFAULT_MUSIC_VOLUME)
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled.unwrap_or(false)
    }

    pub fn messages(&self) -> NotificationMessages {
        self.custom_notification_messages.clone().unwrap_or_default()
    }

    pub fn year_or(&self, current_year: i32) -> i32 {
        self.selected_year.unwrap_or(current_year)
    }

    /// Countdown selection described by these preferences.
    pub fn target_selection(&self, current_year: i32) -> TargetSelection {
        match self.target_date {
            Some(at) => TargetSelection::custom(at, self.target_event_name.clone()),
            None => TargetSelection::for_year(self.year_or(current_year)),
        }
    }

    /// Builder-style setter used by slider controls.
    pub fn with_snow_intensity(mut self, value: u32) -> Self {
        self.snow_intensity = Some(snap_percent(value));
        self
    }

    pub fn with_music_volume(mut self, value: u32) -> Self {
        self.music_volume = Some(snap_percent(value));
        self
    }
}

/// Persistence contract over a [`KeyValueStore`].
///
/// Public methods never fail; errors are logged and replaced with defaults.
#[derive(Debug)]
pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    // ── Preferences ──────────────────────────────────────────────────

    /// Best-effort parse of the persisted snapshot; empty on absence or error.
    pub fn load(&self) -> Preferences {
        self.read_record(SETTINGS_KEY)
    }

    /// Merge `partial` into the latest persisted snapshot and write it back.
    pub fn save(&self, partial: &Preferences) {
        let patch = match serde_json::to_value(partial) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize preferences");
                return;
            }
        };

        let mut current = self.read_object(SETTINGS_KEY);
        for (key, value) in patch {
            current.insert(key, value);
        }
        self.write_json(SETTINGS_KEY, &Value::Object(current));
    }

    /// Drop the stored snapshot entirely.
    pub fn reset(&self) {
        if let Err(e) = self.store.remove(SETTINGS_KEY) {
            tracing::error!(error = %e, "failed to reset preferences");
        }
    }

    // ── Scores ───────────────────────────────────────────────────────

    pub fn load_scores(&self) -> GameScores {
        self.read_record(SCORES_KEY)
    }

    /// Store `score` if it strictly beats the recorded best.
    ///
    /// Returns the previous best when a new record was written. Games
    /// without a score slot are ignored.
    pub fn save_score(&self, game: GameKind, score: u32) -> Option<u32> {
        let mut scores = self.load_scores();
        let previous = scores.get(game)?;
        if score <= previous {
            return None;
        }
        scores.set(game, score);
        self.write_json(SCORES_KEY, &scores);
        tracing::debug!(game = %game, score, previous, "new best score");
        Some(previous)
    }

    // ── Notification flags ───────────────────────────────────────────

    pub fn load_notification_state(&self, year: i32) -> NotificationSentState {
        self.read_record(&notification_key(year))
    }

    pub fn save_notification_state(&self, year: i32, state: &NotificationSentState) {
        self.write_json(&notification_key(year), state);
    }

    /// Years with a stored notification record. Records are never deleted.
    pub fn notification_years(&self) -> Vec<i32> {
        match self.store.keys_with_prefix(NOTIFICATION_KEY_PREFIX) {
            Ok(keys) => keys
                .iter()
                .filter_map(|k| k[NOTIFICATION_KEY_PREFIX.len()..].parse().ok())
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to list notification records");
                Vec::new()
            }
        }
    }

    // ── Generic blobs ────────────────────────────────────────────────

    /// Read and parse a JSON blob, falling back to `T::default()`.
    pub fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value");
                return T::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "discarding unparseable stored value");
            T::default()
        })
    }

    /// Read a JSON object field by field.
    ///
    /// A field that does not fit `T` is dropped with a warning and the rest of
    /// the record is kept. The stored blob is left as it is.
    pub fn read_record<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let fields: Map<String, Value> = self
            .read_object(key)
            .into_iter()
            .filter(|(field, value)| {
                let mut single = Map::new();
                single.insert(field.clone(), value.clone());
                match serde_json::from_value::<T>(Value::Object(single)) {
                    Ok(_) => true,
                    Err(e) => {
                        tracing::warn!(key, %field, error = %e, "ignoring unreadable stored field");
                        false
                    }
                }
            })
            .collect();
        serde_json::from_value(Value::Object(fields)).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "discarding unparseable stored value");
            T::default()
        })
    }

    /// Serialize and overwrite a JSON blob. Failures are logged.
    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to serialize value");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &raw) {
            tracing::error!(key, error = %e, "failed to persist value");
        }
    }

    fn read_object(&self, key: &str) -> Map<String, Value> {
        match self.read_json::<Value>(key) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

fn notification_key(year: i32) -> String {
    format!("{NOTIFICATION_KEY_PREFIX}{year}")
}
