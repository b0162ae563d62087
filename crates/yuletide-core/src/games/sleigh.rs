//! Santa sleigh ride: dodge the obstacles scrolling in from the right.

use rand::Rng;
use serde::Serialize;

use super::arcade::{ArcadePolicy, GameRng, LoopTiming};
use super::arena::Arena;
use super::{GameKind, GameOutcome};

const START_Y: f64 = 200.0;
const MAX_Y: f64 = 360.0;
const MOVE_PX: f64 = 30.0;
const SPAWN_X: f64 = 600.0;
const SCROLL_PX: f64 = 5.0;
const DESPAWN_X: f64 = -50.0;
const SPAWN_MS: u64 = 1_500;
const STEP_MS: u64 = 50;

/// Horizontal band the sleigh occupies, exclusive on both ends.
const HIT_BAND: (f64, f64) = (20.0, 100.0);
const HIT_DISTANCE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleighInput {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct SleighRide {
    sleigh_y: f64,
    obstacles: Arena<Obstacle>,
    score: u32,
}

impl Default for SleighRide {
    fn default() -> Self {
        Self {
            sleigh_y: START_Y,
            obstacles: Arena::new(),
            score: 0,
        }
    }
}

impl SleighRide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleigh_y(&self) -> f64 {
        self.sleigh_y
    }

    pub fn obstacles(&self) -> &Arena<Obstacle> {
        &self.obstacles
    }

    fn collided(&self) -> Option<GameOutcome> {
        let hit = self.obstacles.iter().any(|(_, o)| {
            o.x > HIT_BAND.0 && o.x < HIT_BAND.1 && (o.y - self.sleigh_y).abs() < HIT_DISTANCE
        });
        hit.then_some(GameOutcome::Lost)
    }
}

impl ArcadePolicy for SleighRide {
    type Input = SleighInput;

    const KIND: GameKind = GameKind::SleighRide;

    fn timing(&self) -> LoopTiming {
        LoopTiming {
            spawn_every_ms: Some(SPAWN_MS),
            step_every_ms: Some(STEP_MS),
            time_limit_secs: None,
        }
    }

    fn reset(&mut self, _rng: &mut GameRng) {
        *self = Self::default();
    }

    fn spawn(&mut self, rng: &mut GameRng) {
        self.obstacles.insert(Obstacle {
            x: SPAWN_X,
            y: rng.gen_range(0.0..MAX_Y),
        });
    }

    fn step(&mut self) -> Option<GameOutcome> {
        for (_, o) in self.obstacles.iter_mut() {
            o.x -= SCROLL_PX;
        }
        self.obstacles.retain(|o| o.x > DESPAWN_X);
        self.score += 1;
        self.collided()
    }

    fn handle(&mut self, input: SleighInput) -> Option<GameOutcome> {
        let dy = match input {
            SleighInput::Up => -MOVE_PX,
            SleighInput::Down => MOVE_PX,
        };
        self.sleigh_y = (self.sleigh_y + dy).clamp(0.0, MAX_Y);
        self.collided()
    }

    fn score(&self) -> u32 {
        self.score
    }
}
