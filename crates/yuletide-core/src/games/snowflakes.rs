//! Catch the snowflakes before the 30 second timer runs out.

use rand::Rng;
use serde::Serialize;

use super::arcade::{ArcadePolicy, GameRng, LoopTiming};
use super::arena::{Arena, EntityId};
use super::{GameKind, GameOutcome};
use crate::error::ValidationError;

const TIME_LIMIT_SECS: u32 = 30;
const SPAWN_MS: u64 = 800;
const STEP_MS: u64 = 16;
const FLAKE_SIZE: f64 = 40.0;
const POINTS_PER_CATCH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snowflake {
    pub x: f64,
    pub y: f64,
    /// Pixels per movement step.
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnowflakeInput {
    Catch(EntityId),
}

#[derive(Debug, Clone)]
pub struct CatchSnowflakes {
    width: f64,
    height: f64,
    flakes: Arena<Snowflake>,
    score: u32,
}

impl Default for CatchSnowflakes {
    fn default() -> Self {
        Self::new(400, 400)
    }
}

impl CatchSnowflakes {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            flakes: Arena::new(),
            score: 0,
        }
    }

    pub fn flakes(&self) -> &Arena<Snowflake> {
        &self.flakes
    }
}

impl ArcadePolicy for CatchSnowflakes {
    type Input = SnowflakeInput;

    const KIND: GameKind = GameKind::CatchSnowflakes;

    fn timing(&self) -> LoopTiming {
        LoopTiming {
            spawn_every_ms: Some(SPAWN_MS),
            step_every_ms: Some(STEP_MS),
            time_limit_secs: Some(TIME_LIMIT_SECS),
        }
    }

    fn reset(&mut self, _rng: &mut GameRng) {
        self.flakes.clear();
        self.score = 0;
    }

    fn spawn(&mut self, rng: &mut GameRng) {
        let span = (self.width - FLAKE_SIZE).max(1.0);
        self.flakes.insert(Snowflake {
            x: rng.gen_range(0.0..span),
            y: -FLAKE_SIZE,
            speed: rng.gen_range(2.0..5.0),
        });
    }

    fn step(&mut self) -> Option<GameOutcome> {
        for (_, flake) in self.flakes.iter_mut() {
            flake.y += flake.speed;
        }
        let height = self.height;
        self.flakes.retain(|f| f.y < height);
        None
    }

    fn validate(&self, input: &SnowflakeInput) -> Result<(), ValidationError> {
        let SnowflakeInput::Catch(id) = *input;
        if !self.flakes.issued(id) {
            return Err(ValidationError::NotFound {
                kind: "snowflake".into(),
                id: id.0.to_string(),
            });
        }
        Ok(())
    }

    fn handle(&mut self, input: SnowflakeInput) -> Option<GameOutcome> {
        let SnowflakeInput::Catch(id) = input;
        if self.flakes.remove(id).is_some() {
            self.score += POINTS_PER_CATCH;
        }
        None
    }

    fn score(&self) -> u32 {
        self.score
    }
}
