mod config;
pub mod database;
pub mod kv;
pub mod preferences;
pub mod scores;

pub use config::{AppConfig, CountdownConfig, GamesConfig, LoggingConfig, StorageConfig, StoreBackend};
pub use database::SqliteStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use preferences::{
    ColorBlindMode, NotificationMessages, PreferenceStore, Preferences, GIFTS_KEY, SCORES_KEY,
    SETTINGS_KEY,
};
pub use scores::GameScores;

use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// Returns `~/.config/yuletide[-dev]/` based on YULETIDE_ENV.
///
/// Set YULETIDE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("YULETIDE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("yuletide-dev")
    } else {
        base_dir.join("yuletide")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Open the key-value backend named by the config.
///
/// `YULETIDE_STORE=memory` forces the in-process backend regardless of config.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, StorageError> {
    let forced_memory = std::env::var("YULETIDE_STORE")
        .map(|v| v.eq_ignore_ascii_case("memory"))
        .unwrap_or(false);

    if forced_memory || config.backend == StoreBackend::Memory {
        tracing::debug!("using in-memory store");
        return Ok(Box::new(MemoryStore::new()));
    }
    Ok(Box::new(SqliteStore::open()?))
}

/// Preference store on the backend named by the config.
pub fn open_preferences(config: &StorageConfig) -> Result<PreferenceStore<Box<dyn KeyValueStore>>> {
    Ok(PreferenceStore::new(open_store(config)?))
}
