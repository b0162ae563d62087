//! # Yuletide Core Library
//!
//! This library provides the core logic for the Yuletide Christmas countdown.
//! Every operation is available through the standalone `yuletide` CLI; any
//! graphical front end is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` and reports arrival and year rollover
//! - **Storage**: A key-value persistence contract (SQLite or in-memory) for
//!   preferences, best scores and notification flags, plus TOML configuration
//! - **Notifications**: One-shot reminders at 7, 3 and 1 days out
//! - **Games**: Six mini-games on one tick-driven arcade loop
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: Countdown state machine
//! - [`PreferenceStore`]: Settings and best-score persistence
//! - [`NotificationScheduler`]: Threshold reminders
//! - [`ArcadeLoop`]: Shared game loop

pub mod clock;
pub mod countdown;
pub mod error;
pub mod events;
pub mod games;
pub mod gifts;
pub mod notify;
pub mod settings_api;
pub mod storage;
pub mod themes;

pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::{CountdownEngine, CountdownState, TargetSelection, TimeRemaining};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use games::{ArcadeLoop, ArcadePolicy, GameKind, GameOutcome, GamePhase};
pub use gifts::{Gift, GiftPlanner};
pub use notify::{NotificationScheduler, Notifier, Threshold};
pub use settings_api::SettingsEndpoint;
pub use storage::{AppConfig, KeyValueStore, MemoryStore, PreferenceStore, Preferences, SqliteStore};
pub use themes::ThemeId;
