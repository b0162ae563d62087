//! The shared tick-driven game loop.
//!
//! The loop has no thread of its own. The caller feeds it elapsed wall time
//! through `advance()` and the loop fires each fixed-period timer as many
//! times as that span covers, in chronological order. Input goes through
//! `send()`. Everything is dropped by `reset()`, so there is no timer to leak.

use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

use super::{GameKind, GameOutcome, GamePhase};
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::{KeyValueStore, PreferenceStore};

pub type GameRng = Mcg128Xsl64;

const COUNTDOWN_PERIOD_MS: u64 = 1_000;

/// Fixed timer periods a policy asks for. `None` disables that timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopTiming {
    pub spawn_every_ms: Option<u64>,
    pub step_every_ms: Option<u64>,
    pub time_limit_secs: Option<u32>,
}

/// Game-specific rules plugged into [`ArcadeLoop`].
pub trait ArcadePolicy {
    type Input;

    const KIND: GameKind;

    fn timing(&self) -> LoopTiming;

    /// Discard the session's entities and score. Called on start and reset.
    fn reset(&mut self, rng: &mut GameRng);

    /// Introduce new entities.
    fn spawn(&mut self, _rng: &mut GameRng) {}

    /// Advance movement by one fixed step.
    fn step(&mut self) -> Option<GameOutcome> {
        None
    }

    /// Reject input naming something that never existed in this session,
    /// such as a card index past the board. Stale input is not an error.
    fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
        Ok(())
    }

    fn handle(&mut self, input: Self::Input) -> Option<GameOutcome>;

    fn score(&self) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Spawn,
    Step,
    Countdown,
}

#[derive(Debug, Clone)]
pub struct ArcadeLoop<P: ArcadePolicy> {
    policy: P,
    phase: GamePhase,
    rng: GameRng,
    spawn_acc_ms: u64,
    step_acc_ms: u64,
    countdown_acc_ms: u64,
    time_left_secs: Option<u32>,
}

impl<P: ArcadePolicy> ArcadeLoop<P> {
    pub fn new(policy: P) -> Self {
        Self::with_rng(policy, Mcg128Xsl64::from_entropy())
    }

    /// Deterministic loop for tests and replays.
    pub fn with_seed(policy: P, seed: u64) -> Self {
        Self::with_rng(policy, Mcg128Xsl64::seed_from_u64(seed))
    }

    fn with_rng(mut policy: P, mut rng: GameRng) -> Self {
        policy.reset(&mut rng);
        Self {
            policy,
            phase: GamePhase::Idle,
            rng,
            spawn_acc_ms: 0,
            step_acc_ms: 0,
            countdown_acc_ms: 0,
            time_left_secs: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> GameKind {
        P::KIND
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn score(&self) -> u32 {
        self.policy.score()
    }

    /// Seconds left on the countdown, for timed games.
    pub fn time_left_secs(&self) -> Option<u32> {
        self.time_left_secs
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh session. No-op while already playing.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_playing() {
            return None;
        }
        self.clear_session();
        self.time_left_secs = self.policy.timing().time_limit_secs;
        self.phase = GamePhase::Playing;
        Some(Event::GameStarted { game: P::KIND })
    }

    /// Back to idle, discarding the session.
    pub fn reset(&mut self) {
        self.clear_session();
        self.phase = GamePhase::Idle;
    }

    /// Apply player input. Ignored unless playing.
    pub fn send(&mut self, input: P::Input) -> Option<Event> {
        if !self.is_playing() {
            return None;
        }
        let outcome = self.policy.handle(input)?;
        Some(self.finish(outcome))
    }

    /// Like [`send`](Self::send), but reports input the policy rejects.
    pub fn try_send(&mut self, input: P::Input) -> Result<Option<Event>, ValidationError> {
        self.policy.validate(&input)?;
        Ok(self.send(input))
    }

    /// Run every timer expiry within the next `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<Event> {
        if !self.is_playing() {
            return None;
        }
        let timing = self.policy.timing();
        let mut remaining = elapsed_ms;

        loop {
            let next = self.next_due(&timing);
            let Some((timer, wait)) = next else {
                return None;
            };
            if wait > remaining {
                self.accumulate(&timing, remaining);
                return None;
            }
            remaining -= wait;
            self.accumulate(&timing, wait);

            if let Some(outcome) = self.fire(timer, &timing) {
                return Some(self.finish(outcome));
            }
        }
    }

    /// Persist the finished session's score if it beats the stored best.
    pub fn submit_best<S: KeyValueStore>(&self, store: &PreferenceStore<S>) -> Option<Event> {
        if !matches!(self.phase, GamePhase::Finished(_)) {
            return None;
        }
        let score = self.score();
        let previous = store.save_score(P::KIND, score)?;
        Some(Event::HighScore {
            game: P::KIND,
            score,
            previous,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn clear_session(&mut self) {
        self.policy.reset(&mut self.rng);
        self.spawn_acc_ms = 0;
        self.step_acc_ms = 0;
        self.countdown_acc_ms = 0;
        self.time_left_secs = None;
    }

    fn finish(&mut self, outcome: GameOutcome) -> Event {
        self.phase = GamePhase::Finished(outcome);
        let score = self.score();
        tracing::debug!(game = %P::KIND, ?outcome, score, "game finished");
        Event::GameFinished {
            game: P::KIND,
            outcome,
            score,
        }
    }

    /// Earliest pending timer and the wait until it fires. Ties go to
    /// spawn, then step, then the countdown.
    fn next_due(&self, timing: &LoopTiming) -> Option<(Timer, u64)> {
        let countdown = self
            .time_left_secs
            .filter(|left| *left > 0)
            .map(|_| COUNTDOWN_PERIOD_MS);
        [
            (Timer::Spawn, timing.spawn_every_ms, self.spawn_acc_ms),
            (Timer::Step, timing.step_every_ms, self.step_acc_ms),
            (Timer::Countdown, countdown, self.countdown_acc_ms),
        ]
        .into_iter()
        .filter_map(|(timer, period, acc)| {
            period
                .filter(|p| *p > 0)
                .map(|p| (timer, p.saturating_sub(acc)))
        })
        .min_by_key(|(_, wait)| *wait)
    }

    fn accumulate(&mut self, timing: &LoopTiming, ms: u64) {
        if timing.spawn_every_ms.is_some() {
            self.spawn_acc_ms += ms;
        }
        if timing.step_every_ms.is_some() {
            self.step_acc_ms += ms;
        }
        if self.time_left_secs.is_some() {
            self.countdown_acc_ms += ms;
        }
    }

    fn fire(&mut self, timer: Timer, timing: &LoopTiming) -> Option<GameOutcome> {
        match timer {
            Timer::Spawn => {
                self.spawn_acc_ms -= timing.spawn_every_ms.unwrap_or(0);
                self.policy.spawn(&mut self.rng);
                None
            }
            Timer::Step => {
                self.step_acc_ms -= timing.step_every_ms.unwrap_or(0);
                self.policy.step()
            }
            Timer::Countdown => {
                self.countdown_acc_ms -= COUNTDOWN_PERIOD_MS;
                let left = self.time_left_secs.unwrap_or(0).saturating_sub(1);
                self.time_left_secs = Some(left);
                (left == 0).then_some(GameOutcome::TimeUp)
            }
        }
    }
}
