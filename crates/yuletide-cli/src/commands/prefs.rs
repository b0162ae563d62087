use clap::Subcommand;
use serde_json::{Map, Value};
use yuletide_core::storage::preferences::snap_percent;
use yuletide_core::{AppConfig, Preferences};

use super::{open_preferences, print_json, CliResult};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Get a stored preference (camelCase key, e.g. "snowIntensity")
    Get {
        key: String,
    },
    /// Set a preference; other stored fields are kept
    Set {
        key: String,
        /// JSON literal or bare string
        value: String,
    },
    /// Print the stored preferences
    List,
    /// Forget all stored preferences
    Reset,
}

pub fn run(action: PrefsAction) -> CliResult {
    let config = AppConfig::load_or_default();
    let prefs = open_preferences(&config)?;

    match action {
        PrefsAction::Get { key } => {
            let stored = serde_json::to_value(prefs.load())?;
            match stored.get(&key) {
                Some(Value::String(s)) => println!("{s}"),
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("preference not set: {key}");
                    std::process::exit(1);
                }
            }
        }
        PrefsAction::Set { key, value } => {
            let partial = parse_partial(&key, &value)?;
            prefs.save(&partial);
            println!("ok");
        }
        PrefsAction::List => {
            print_json(&prefs.load())?;
        }
        PrefsAction::Reset => {
            prefs.reset();
            println!("preferences reset");
        }
    }
    Ok(())
}

/// Build a one-field update, validating the key and value type.
fn parse_partial(key: &str, raw: &str) -> Result<Preferences, Box<dyn std::error::Error>> {
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    let value = match (key, value) {
        ("snowIntensity" | "musicVolume", Value::Number(n)) => {
            let n = n.as_u64().ok_or_else(|| format!("{key} must be a whole number"))?;
            Value::from(snap_percent(u32::try_from(n).unwrap_or(u32::MAX)))
        }
        (_, value) => value,
    };

    let mut map = Map::new();
    map.insert(key.to_string(), value);
    let partial: Preferences = serde_json::from_value(Value::Object(map))
        .map_err(|e| format!("invalid value for {key}: {e}"))?;

    // Unknown keys deserialize to an empty update.
    if serde_json::to_value(&partial)?.get(key).is_none() {
        return Err(format!("unknown preference key: {key}").into());
    }
    Ok(partial)
}
