//! Candy cane stack: drop the sliding segment onto the tower.
//!
//! A drop keeps only the part of the segment that overlaps the current top.
//! Missing the top entirely collapses the stack.

use serde::Serialize;

use super::arcade::{ArcadePolicy, GameRng, LoopTiming};
use super::arena::Arena;
use super::{GameKind, GameOutcome};

const FIELD_WIDTH: f64 = 400.0;
const FIRST_WIDTH: f64 = 100.0;
const WIDTH_DECREMENT: f64 = 10.0;
const MIN_WIDTH: f64 = 30.0;
const SLIDE_PX: f64 = 3.0;
const STEP_MS: u64 = 20;

/// Horizontal footprint `[x, x + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x: f64,
    pub width: f64,
}

impl Segment {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Intersection with `other`, or `None` when they do not overlap.
    pub fn overlap(&self, other: &Segment) -> Option<Segment> {
        let left = self.x.max(other.x);
        let width = self.right().min(other.right()) - left;
        (width > 0.0).then_some(Segment { x: left, width })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandyCaneInput {
    Drop,
}

#[derive(Debug, Clone)]
pub struct CandyCaneStack {
    stack: Arena<Segment>,
    current: Segment,
    direction: f64,
}

impl Default for CandyCaneStack {
    fn default() -> Self {
        Self {
            stack: Arena::new(),
            current: Segment {
                x: 0.0,
                width: FIRST_WIDTH,
            },
            direction: 1.0,
        }
    }
}

impl CandyCaneStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &Arena<Segment> {
        &self.stack
    }

    /// The segment sliding above the tower.
    pub fn current(&self) -> Segment {
        self.current
    }

    pub fn height(&self) -> usize {
        self.stack.len()
    }

    fn spawn_next(&mut self) {
        let width = self
            .stack
            .last()
            .map_or(FIRST_WIDTH, |top| (top.width - WIDTH_DECREMENT).max(MIN_WIDTH));
        self.current = Segment { x: 0.0, width };
        self.direction = 1.0;
    }
}

impl ArcadePolicy for CandyCaneStack {
    type Input = CandyCaneInput;

    const KIND: GameKind = GameKind::CandyCaneStack;

    fn timing(&self) -> LoopTiming {
        LoopTiming {
            step_every_ms: Some(STEP_MS),
            ..LoopTiming::default()
        }
    }

    fn reset(&mut self, _rng: &mut GameRng) {
        *self = Self::default();
    }

    fn step(&mut self) -> Option<GameOutcome> {
        let width = self.current.width;
        let new_x = self.current.x + self.direction * SLIDE_PX;
        if new_x <= 0.0 || new_x + width >= FIELD_WIDTH {
            self.direction = -self.direction;
        }
        self.current.x = new_x.clamp(0.0, FIELD_WIDTH - width);
        None
    }

    fn handle(&mut self, input: CandyCaneInput) -> Option<GameOutcome> {
        let CandyCaneInput::Drop = input;
        let landed = match self.stack.last() {
            None => self.current,
            Some(top) => match self.current.overlap(top) {
                Some(aligned) => aligned,
                None => {
                    tracing::debug!(height = self.height(), "candy cane stack collapsed");
                    return Some(GameOutcome::Lost);
                }
            },
        };
        self.stack.insert(landed);
        self.spawn_next();
        None
    }

    fn score(&self) -> u32 {
        self.height() as u32 * 100
    }
}
