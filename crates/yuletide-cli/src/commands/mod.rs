pub mod config;
pub mod countdown;
pub mod gifts;
pub mod notify;
pub mod play;
pub mod prefs;
pub mod scores;
pub mod settings_api;

use serde::Serialize;
use yuletide_core::{AppConfig, KeyValueStore, PreferenceStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Preference store on the configured backend.
pub fn open_preferences(
    config: &AppConfig,
) -> Result<PreferenceStore<Box<dyn KeyValueStore>>, Box<dyn std::error::Error>> {
    Ok(yuletide_core::storage::open_preferences(&config.storage)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
