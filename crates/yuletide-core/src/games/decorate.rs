//! Decorate the tree: place and remove ornaments, then save the result.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::arcade::{ArcadePolicy, GameRng, LoopTiming};
use super::arena::{Arena, EntityId};
use super::{GameKind, GameOutcome};
use crate::error::ValidationError;

const PLACE_POINTS: u32 = 10;
const REMOVE_PENALTY: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ornament {
    RedBall,
    GoldBall,
    BlueBall,
    Star,
    Bow,
    Bell,
    Gift,
    Snowflake,
}

impl Ornament {
    pub const ALL: [Ornament; 8] = [
        Ornament::RedBall,
        Ornament::GoldBall,
        Ornament::BlueBall,
        Ornament::Star,
        Ornament::Bow,
        Ornament::Bell,
        Ornament::Gift,
        Ornament::Snowflake,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Ornament::RedBall => "🔴",
            Ornament::GoldBall => "🟡",
            Ornament::BlueBall => "🔵",
            Ornament::Star => "⭐",
            Ornament::Bow => "🎀",
            Ornament::Bell => "🔔",
            Ornament::Gift => "🎁",
            Ornament::Snowflake => "❄️",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ornament::RedBall => "red_ball",
            Ornament::GoldBall => "gold_ball",
            Ornament::BlueBall => "blue_ball",
            Ornament::Star => "star",
            Ornament::Bow => "bow",
            Ornament::Bell => "bell",
            Ornament::Gift => "gift",
            Ornament::Snowflake => "snowflake",
        }
    }
}

impl FromStr for Ornament {
    type Err = ValidationError;

    /// Accepts the snake_case name or the emoji itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ornament::ALL
            .into_iter()
            .find(|o| o.as_str() == s || o.emoji() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "ornament".into(),
                message: format!("unknown ornament '{s}'"),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedOrnament {
    pub kind: Ornament,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecorateInput {
    Select(Ornament),
    /// Hang the selected ornament at this point.
    Place { x: f64, y: f64 },
    Remove(EntityId),
    /// Finish decorating and keep the score.
    Save,
}

#[derive(Debug, Clone, Default)]
pub struct DecorateTree {
    ornaments: Arena<PlacedOrnament>,
    selected: Option<Ornament>,
    score: u32,
}

impl DecorateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ornaments(&self) -> &Arena<PlacedOrnament> {
        &self.ornaments
    }

    pub fn selected(&self) -> Option<Ornament> {
        self.selected
    }
}

impl ArcadePolicy for DecorateTree {
    type Input = DecorateInput;

    const KIND: GameKind = GameKind::DecorateTree;

    fn timing(&self) -> LoopTiming {
        LoopTiming::default()
    }

    fn reset(&mut self, _rng: &mut GameRng) {
        *self = Self::default();
    }

    fn validate(&self, input: &DecorateInput) -> Result<(), ValidationError> {
        match *input {
            DecorateInput::Remove(id) if !self.ornaments.issued(id) => {
                Err(ValidationError::NotFound {
                    kind: "ornament".into(),
                    id: id.0.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn handle(&mut self, input: DecorateInput) -> Option<GameOutcome> {
        match input {
            DecorateInput::Select(kind) => self.selected = Some(kind),
            DecorateInput::Place { x, y } => {
                let kind = self.selected.take()?;
                self.ornaments.insert(PlacedOrnament { kind, x, y });
                self.score += PLACE_POINTS;
            }
            DecorateInput::Remove(id) => {
                if self.ornaments.remove(id).is_some() {
                    self.score = self.score.saturating_sub(REMOVE_PENALTY);
                }
            }
            DecorateInput::Save => return Some(GameOutcome::Won),
        }
        None
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{ArcadeLoop, GamePhase};

    fn started() -> ArcadeLoop<DecorateTree> {
        let mut game = ArcadeLoop::with_seed(DecorateTree::new(), 0);
        game.start();
        game
    }

    #[test]
    fn placing_needs_a_selection() {
        let mut game = started();
        game.send(DecorateInput::Place { x: 10.0, y: 10.0 });
        assert!(game.policy().ornaments().is_empty());

        game.send(DecorateInput::Select(Ornament::Star));
        game.send(DecorateInput::Place { x: 10.0, y: 10.0 });
        assert_eq!(game.score(), 10);
        assert_eq!(game.policy().selected(), None);

        game.send(DecorateInput::Place { x: 20.0, y: 20.0 });
        assert_eq!(game.policy().ornaments().len(), 1);
    }

    #[test]
    fn removing_an_unknown_ornament_is_rejected() {
        let mut game = started();
        assert!(game.try_send(DecorateInput::Remove(EntityId(3))).is_err());
        game.send(DecorateInput::Select(Ornament::Star));
        game.send(DecorateInput::Place { x: 1.0, y: 1.0 });
        assert!(game.try_send(DecorateInput::Remove(EntityId(0))).is_ok());
        assert!(game.policy().ornaments().is_empty());
    }

    #[test]
    fn removal_costs_five() {
        let mut game = started();
        game.send(DecorateInput::Select(Ornament::Bell));
        game.send(DecorateInput::Place { x: 1.0, y: 2.0 });
        let (id, _) = game.policy().ornaments().nth(0).unwrap();

        game.send(DecorateInput::Remove(id));
        assert_eq!(game.score(), 5);
        game.send(DecorateInput::Remove(id));
        assert_eq!(game.score(), 5, "already removed");

        game.send(DecorateInput::Select(Ornament::Bow));
        game.send(DecorateInput::Place { x: 1.0, y: 2.0 });
        assert_eq!(game.score(), 15);
    }

    #[test]
    fn ornaments_parse_by_name_or_emoji() {
        assert_eq!("gold_ball".parse::<Ornament>().unwrap(), Ornament::GoldBall);
        assert_eq!("🎀".parse::<Ornament>().unwrap(), Ornament::Bow);
        assert!("tinsel".parse::<Ornament>().is_err());
    }

    #[test]
    fn untimed_until_saved() {
        let mut game = started();
        assert!(game.advance(600_000).is_none());
        assert!(game.is_playing());
        assert!(game.send(DecorateInput::Save).is_some());
        assert_eq!(game.phase(), GamePhase::Finished(GameOutcome::Won));
    }
}
