//! Snowman builder: add parts in dependency order until the snowman is whole.
//!
//! Not scored on the board. The count of finished snowmen is its only
//! tally and survives building a new one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::arcade::{ArcadePolicy, GameRng, LoopTiming};
use super::{GameKind, GameOutcome};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnowmanPart {
    Base,
    Middle,
    Head,
    Hat,
    Scarf,
    Buttons,
    Arms,
    Nose,
    Eyes,
}

impl SnowmanPart {
    pub const ALL: [SnowmanPart; 9] = [
        SnowmanPart::Base,
        SnowmanPart::Middle,
        SnowmanPart::Head,
        SnowmanPart::Hat,
        SnowmanPart::Scarf,
        SnowmanPart::Buttons,
        SnowmanPart::Arms,
        SnowmanPart::Nose,
        SnowmanPart::Eyes,
    ];

    /// The part that must be in place first.
    pub fn prerequisite(&self) -> Option<SnowmanPart> {
        match self {
            SnowmanPart::Base => None,
            SnowmanPart::Middle => Some(SnowmanPart::Base),
            SnowmanPart::Head | SnowmanPart::Buttons | SnowmanPart::Arms => {
                Some(SnowmanPart::Middle)
            }
            SnowmanPart::Hat | SnowmanPart::Scarf | SnowmanPart::Nose | SnowmanPart::Eyes => {
                Some(SnowmanPart::Head)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SnowmanPart::Base => "base",
            SnowmanPart::Middle => "middle",
            SnowmanPart::Head => "head",
            SnowmanPart::Hat => "hat",
            SnowmanPart::Scarf => "scarf",
            SnowmanPart::Buttons => "buttons",
            SnowmanPart::Arms => "arms",
            SnowmanPart::Nose => "nose",
            SnowmanPart::Eyes => "eyes",
        }
    }

    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

impl fmt::Display for SnowmanPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnowmanPart {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SnowmanPart::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "part".into(),
                message: format!("unknown snowman part '{s}'"),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnowmanInput {
    Add(SnowmanPart),
}

#[derive(Debug, Clone, Default)]
pub struct SnowmanBuilder {
    placed: u16,
    completed: u32,
}

impl SnowmanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placed(&self, part: SnowmanPart) -> bool {
        self.placed & part.bit() != 0
    }

    /// Not yet placed and its prerequisite is.
    pub fn can_add(&self, part: SnowmanPart) -> bool {
        let unlocked = part.prerequisite().map_or(true, |pre| self.is_placed(pre));
        unlocked && !self.is_placed(part)
    }

    pub fn placed_parts(&self) -> Vec<SnowmanPart> {
        SnowmanPart::ALL
            .into_iter()
            .filter(|p| self.is_placed(*p))
            .collect()
    }

    /// Rounded share of parts in place.
    pub fn completion_percent(&self) -> u32 {
        let total = SnowmanPart::ALL.len() as u32;
        (self.placed.count_ones() * 100 + total / 2) / total
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    fn is_complete(&self) -> bool {
        SnowmanPart::ALL.iter().all(|p| self.is_placed(*p))
    }
}

impl ArcadePolicy for SnowmanBuilder {
    type Input = SnowmanInput;

    const KIND: GameKind = GameKind::SnowmanBuilder;

    fn timing(&self) -> LoopTiming {
        LoopTiming::default()
    }

    fn reset(&mut self, _rng: &mut GameRng) {
        self.placed = 0;
    }

    fn handle(&mut self, input: SnowmanInput) -> Option<GameOutcome> {
        let SnowmanInput::Add(part) = input;
        if !self.can_add(part) {
            tracing::debug!(%part, "snowman part not available yet");
            return None;
        }
        self.placed |= part.bit();
        if self.is_complete() {
            self.completed += 1;
            return Some(GameOutcome::Won);
        }
        None
    }

    fn score(&self) -> u32 {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{ArcadeLoop, GamePhase};

    fn build_all(game: &mut ArcadeLoop<SnowmanBuilder>) {
        for part in SnowmanPart::ALL {
            game.send(SnowmanInput::Add(part));
        }
    }

    #[test]
    fn parts_unlock_in_order() {
        let mut b = SnowmanBuilder::new();
        assert!(b.can_add(SnowmanPart::Base));
        assert!(!b.can_add(SnowmanPart::Head));
        assert_eq!(b.handle(SnowmanInput::Add(SnowmanPart::Hat)), None);
        assert!(!b.is_placed(SnowmanPart::Hat));

        b.handle(SnowmanInput::Add(SnowmanPart::Base));
        b.handle(SnowmanInput::Add(SnowmanPart::Middle));
        assert!(b.can_add(SnowmanPart::Buttons));
        assert!(b.can_add(SnowmanPart::Arms));
        assert!(!b.can_add(SnowmanPart::Nose));
        assert!(!b.can_add(SnowmanPart::Middle), "already placed");
    }

    #[test]
    fn completion_percent_rounds() {
        let mut b = SnowmanBuilder::new();
        assert_eq!(b.completion_percent(), 0);
        b.handle(SnowmanInput::Add(SnowmanPart::Base));
        assert_eq!(b.completion_percent(), 11);
        b.handle(SnowmanInput::Add(SnowmanPart::Middle));
        assert_eq!(b.completion_percent(), 22);
    }

    #[test]
    fn completed_count_survives_rebuilds() {
        let mut game = ArcadeLoop::with_seed(SnowmanBuilder::new(), 0);
        game.start();
        build_all(&mut game);
        assert_eq!(game.phase(), GamePhase::Finished(GameOutcome::Won));
        assert_eq!(game.policy().completion_percent(), 100);

        game.start();
        assert!(game.policy().placed_parts().is_empty());
        build_all(&mut game);
        assert_eq!(game.policy().completed(), 2);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn parts_parse_by_name() {
        assert_eq!("scarf".parse::<SnowmanPart>().unwrap(), SnowmanPart::Scarf);
        assert!("carrot".parse::<SnowmanPart>().is_err());
    }
}
