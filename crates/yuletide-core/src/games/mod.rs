//! Mini-games.
//!
//! Every game is an [`ArcadePolicy`] run by the shared [`ArcadeLoop`], which
//! owns the phase machine, the fixed-period spawn/step timers, the optional
//! countdown and the RNG:
//!
//! ```text
//! Idle -> Playing -> Finished(Won | Lost | TimeUp) -> Idle (reset) or Playing (start)
//! ```

mod arcade;
mod arena;
mod candy_cane;
mod decorate;
mod memory;
mod sleigh;
mod snowflakes;
mod snowman;

pub use arcade::{ArcadeLoop, ArcadePolicy, GameRng, LoopTiming};
pub use arena::{Arena, EntityId};
pub use candy_cane::{CandyCaneInput, CandyCaneStack, Segment};
pub use decorate::{DecorateInput, DecorateTree, Ornament, PlacedOrnament};
pub use memory::{Card, MemoryInput, MemoryMatch, CARD_EMOJI};
pub use sleigh::{Obstacle, SleighInput, SleighRide};
pub use snowflakes::{CatchSnowflakes, SnowflakeInput, Snowflake};
pub use snowman::{SnowmanBuilder, SnowmanInput, SnowmanPart};

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::countdown::{days_until_ceil, TargetSelection};
use crate::error::{Result, ValidationError};
use crate::storage::{KeyValueStore, PreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    MemoryMatch,
    CatchSnowflakes,
    DecorateTree,
    SnowmanBuilder,
    SleighRide,
    CandyCaneStack,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::MemoryMatch,
        GameKind::CatchSnowflakes,
        GameKind::DecorateTree,
        GameKind::SnowmanBuilder,
        GameKind::SleighRide,
        GameKind::CandyCaneStack,
    ];

    /// Short id used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::MemoryMatch => "memory",
            GameKind::CatchSnowflakes => "snowflakes",
            GameKind::DecorateTree => "decorate",
            GameKind::SnowmanBuilder => "snowman",
            GameKind::SleighRide => "sleigh",
            GameKind::CandyCaneStack => "stack",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::MemoryMatch => "Memory GIF Game",
            GameKind::CatchSnowflakes => "Catch the Snowflakes",
            GameKind::DecorateTree => "Decorate the Tree",
            GameKind::SnowmanBuilder => "Build a Snowman",
            GameKind::SleighRide => "Santa Sleigh Ride",
            GameKind::CandyCaneStack => "Candy Cane Stack",
        }
    }

    /// The game opens once this many days or fewer remain.
    pub fn unlock_days(&self) -> i64 {
        match self {
            GameKind::MemoryMatch => 25,
            GameKind::CatchSnowflakes => 20,
            GameKind::DecorateTree => 15,
            GameKind::SnowmanBuilder => 12,
            GameKind::SleighRide => 10,
            GameKind::CandyCaneStack => 5,
        }
    }

    /// `days_remaining` comes from [`days_until_ceil`](crate::countdown::days_until_ceil).
    pub fn is_unlocked(&self, days_remaining: i64) -> bool {
        days_remaining <= self.unlock_days()
    }

    /// Days until the game opens; 0 once it is open.
    pub fn days_until_unlock(&self, days_remaining: i64) -> i64 {
        (days_remaining - self.unlock_days()).max(0)
    }

    pub fn ensure_unlocked(&self, days_remaining: i64) -> Result<(), ValidationError> {
        if self.is_unlocked(days_remaining) {
            return Ok(());
        }
        Err(ValidationError::Locked {
            game: self.as_str().to_string(),
            days: self.days_until_unlock(days_remaining),
        })
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "game".into(),
                message: format!("unknown game '{s}'"),
            })
    }
}

/// Days left until Christmas of the selected year, or the lock error when
/// `game` is not open yet. Custom countdown targets do not unlock games.
pub fn ensure_playable<S: KeyValueStore>(
    game: GameKind,
    prefs: &PreferenceStore<S>,
    now: NaiveDateTime,
) -> Result<i64> {
    let year = prefs.load().year_or(now.year());
    let christmas = TargetSelection::for_year(year).resolve(now);
    let days = days_until_ceil(christmas.instant, now);
    game.ensure_unlocked(days)?;
    Ok(days)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Won,
    Lost,
    TimeUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "outcome", rename_all = "snake_case")]
pub enum GamePhase {
    Idle,
    Playing,
    Finished(GameOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ids_roundtrip() {
        for kind in GameKind::ALL {
            assert_eq!(kind.as_str().parse::<GameKind>().unwrap(), kind);
        }
        assert!("pong".parse::<GameKind>().is_err());
    }

    #[test]
    fn games_unlock_on_their_day() {
        assert!(!GameKind::MemoryMatch.is_unlocked(26));
        assert!(GameKind::MemoryMatch.is_unlocked(25));
        assert!(!GameKind::CandyCaneStack.is_unlocked(6));
        assert!(GameKind::CandyCaneStack.is_unlocked(5));
        assert_eq!(GameKind::CandyCaneStack.days_until_unlock(6), 1);
        assert_eq!(GameKind::CandyCaneStack.days_until_unlock(5), 0);
    }

    #[test]
    fn everything_is_open_after_the_day() {
        assert!(GameKind::ALL.iter().all(|g| g.is_unlocked(0)));
        assert!(GameKind::ALL.iter().all(|g| g.is_unlocked(-40)));
    }

    #[test]
    fn locked_game_reports_days_left() {
        let err = GameKind::SleighRide.ensure_unlocked(13).unwrap_err();
        assert_eq!(err.to_string(), "sleigh unlocks in 3 days");
        assert!(GameKind::SleighRide.ensure_unlocked(10).is_ok());
    }

    #[test]
    fn unlocks_follow_the_selected_christmas() {
        use crate::error::CoreError;
        use crate::storage::{MemoryStore, Preferences};

        let prefs = PreferenceStore::new(MemoryStore::new());
        let dec_1 = chrono::NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        assert_eq!(ensure_playable(GameKind::MemoryMatch, &prefs, dec_1).unwrap(), 24);
        match ensure_playable(GameKind::CandyCaneStack, &prefs, dec_1) {
            Err(CoreError::Validation(ValidationError::Locked { days, .. })) => assert_eq!(days, 19),
            other => panic!("Expected Locked, got {other:?}"),
        }

        prefs.save(&Preferences {
            selected_year: Some(2026),
            ..Preferences::default()
        });
        assert!(ensure_playable(GameKind::MemoryMatch, &prefs, dec_1).is_err());
    }

    #[test]
    fn phase_serializes_with_outcome() {
        let json = serde_json::to_string(&GamePhase::Finished(GameOutcome::TimeUp)).unwrap();
        assert_eq!(json, r#"{"phase":"finished","outcome":"time_up"}"#);
    }
}
