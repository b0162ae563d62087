use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::countdown::{CountdownState, TimeRemaining};
use crate::games::{GameKind, GameOutcome};
use crate::notify::Threshold;

/// Every observable state change produces an Event.
/// The CLI prints them; observers (celebration effects, notifiers) react to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The live target was reached. Emitted once per target instant.
    CountdownArrived {
        label: String,
        target: NaiveDateTime,
        at: NaiveDateTime,
    },
    /// The target moved past "now" again after an arrival.
    CountdownResumed {
        label: String,
        target: NaiveDateTime,
        at: NaiveDateTime,
    },
    /// The Dec 26 rule advanced the selected year.
    YearRolledOver {
        from_year: i32,
        to_year: i32,
        at: NaiveDateTime,
    },
    CountdownSnapshot {
        state: CountdownState,
        label: String,
        target: Option<NaiveDateTime>,
        remaining: TimeRemaining,
        at: NaiveDateTime,
    },
    NotificationSent {
        threshold: Threshold,
        year: i32,
        title: String,
        body: String,
        at: NaiveDateTime,
    },
    GameStarted {
        game: GameKind,
    },
    GameFinished {
        game: GameKind,
        outcome: GameOutcome,
        score: u32,
    },
    /// A finished game beat the stored best score.
    HighScore {
        game: GameKind,
        score: u32,
        previous: u32,
    },
}
