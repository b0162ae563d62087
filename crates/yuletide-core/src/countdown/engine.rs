//! Countdown engine.
//!
//! Like the rest of the crate's timers this is a wall-clock-based state
//! machine with no internal thread: the caller invokes `tick()` once per
//! second and the engine re-derives everything from the clock and the live
//! target, so missed or late ticks never accumulate drift.
//!
//! ## State Transitions
//!
//! ```text
//! Counting -> Arrived -> Counting (once the target rolls forward)
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::target::{ResolvedTarget, TargetSelection};
use crate::clock::Clock;
use crate::events::Event;

pub const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Counting,
    Arrived,
}

/// Remaining time decomposed for display. Derived on every tick, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeRemaining {
    /// Floor-decompose a millisecond difference. Non-positive input pins to zero.
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::default();
        }
        let diff = diff_ms as u64;
        Self {
            days: diff / MS_PER_DAY as u64,
            hours: (diff / MS_PER_HOUR as u64) % 24,
            minutes: (diff / MS_PER_MINUTE as u64) % 60,
            seconds: (diff / MS_PER_SECOND as u64) % 60,
        }
    }

    pub fn between(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self::from_millis((target - now).num_milliseconds())
    }

    /// Milliseconds represented by the four fields (second resolution).
    pub fn total_millis(&self) -> u64 {
        self.days * MS_PER_DAY as u64
            + self.hours * MS_PER_HOUR as u64
            + self.minutes * MS_PER_MINUTE as u64
            + self.seconds * MS_PER_SECOND as u64
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Core countdown engine.
///
/// Operates on wall-clock reads -- no internal thread.
#[derive(Debug)]
pub struct CountdownEngine<C: Clock> {
    clock: C,
    selection: TargetSelection,
    state: CountdownState,
    remaining: TimeRemaining,
    target: Option<ResolvedTarget>,
    /// Target instant for which the arrival was already announced.
    arrived_for: Option<NaiveDateTime>,
}

impl<C: Clock> CountdownEngine<C> {
    pub fn new(clock: C, selection: TargetSelection) -> Self {
        Self {
            clock,
            selection,
            state: CountdownState::Counting,
            remaining: TimeRemaining::default(),
            target: None,
            arrived_for: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining(&self) -> TimeRemaining {
        self.remaining
    }

    pub fn selection(&self) -> &TargetSelection {
        &self.selection
    }

    /// Target from the most recent tick.
    pub fn target(&self) -> Option<&ResolvedTarget> {
        self.target.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let target = self.target.as_ref();
        Event::CountdownSnapshot {
            state: self.state,
            label: target.map(|t| t.label.clone()).unwrap_or_default(),
            target: target.map(|t| t.instant),
            remaining: self.remaining,
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the selection; the next tick resolves against it.
    pub fn set_selection(&mut self, selection: TargetSelection) {
        self.selection = selection;
    }

    /// Recompute against the live target. Returns the transitions this tick
    /// produced, in order (rollover, then arrival or resumption).
    pub fn tick(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();

        let previous_year = self.selection.year;
        let target = self.selection.resolve(now);
        if target.rolled_over {
            events.push(Event::YearRolledOver {
                from_year: previous_year.unwrap_or(target.year - 1),
                to_year: target.year,
                at: now,
            });
        }

        let diff_ms = (target.instant - now).num_milliseconds();
        self.remaining = TimeRemaining::from_millis(diff_ms);

        if diff_ms <= 0 {
            self.state = CountdownState::Arrived;
            if self.arrived_for != Some(target.instant) {
                self.arrived_for = Some(target.instant);
                tracing::info!(label = %target.label, "countdown target reached");
                events.push(Event::CountdownArrived {
                    label: target.label.clone(),
                    target: target.instant,
                    at: now,
                });
            }
        } else if self.state == CountdownState::Arrived {
            self.state = CountdownState::Counting;
            events.push(Event::CountdownResumed {
                label: target.label.clone(),
                target: target.instant,
                at: now,
            });
        }

        self.target = Some(target);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::Duration;
    use proptest::prelude::*;

    #[test]
    fn decomposes_with_floor_division() {
        let ms = 3 * MS_PER_DAY + 4 * MS_PER_HOUR + 5 * MS_PER_MINUTE + 6 * MS_PER_SECOND + 999;
        let t = TimeRemaining::from_millis(ms);
        assert_eq!(
            t,
            TimeRemaining {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
    }

    #[test]
    fn non_positive_difference_pins_to_zero() {
        assert!(TimeRemaining::from_millis(0).is_zero());
        assert!(TimeRemaining::from_millis(-12_345).is_zero());
    }

    #[test]
    fn arrival_fires_exactly_once_per_target() {
        let clock = FixedClock::at(2025, 12, 24, 23, 59, 58).unwrap();
        let mut engine = CountdownEngine::new(&clock, TargetSelection::for_year(2025));

        assert!(engine.tick().is_empty());
        assert_eq!(engine.state(), CountdownState::Counting);
        assert_eq!(engine.remaining().seconds, 2);

        clock.advance(Duration::seconds(2));
        let events = engine.tick();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::CountdownArrived { .. }));
        assert_eq!(engine.state(), CountdownState::Arrived);
        assert!(engine.remaining().is_zero());

        for _ in 0..5 {
            clock.advance(Duration::seconds(1));
            assert!(engine.tick().is_empty());
            assert!(engine.remaining().is_zero());
        }
    }

    #[test]
    fn rollover_resumes_counting() {
        let clock = FixedClock::at(2025, 12, 25, 23, 59, 59).unwrap();
        let mut engine = CountdownEngine::new(&clock, TargetSelection::for_year(2025));
        assert_eq!(engine.tick().len(), 1);

        clock.advance(Duration::seconds(1));
        let events = engine.tick();
        assert!(matches!(
            events[0],
            Event::YearRolledOver {
                from_year: 2025,
                to_year: 2026,
                ..
            }
        ));
        assert!(matches!(events[1], Event::CountdownResumed { .. }));
        assert_eq!(engine.state(), CountdownState::Counting);
        assert_eq!(engine.remaining().days, 364);
        assert_eq!(engine.selection().year, Some(2026));
    }

    #[test]
    fn snapshot_carries_label_and_remaining() {
        let clock = FixedClock::at(2025, 12, 1, 0, 0, 0).unwrap();
        let mut engine = CountdownEngine::new(&clock, TargetSelection::for_year(2025));
        engine.tick();
        match engine.snapshot() {
            Event::CountdownSnapshot {
                state,
                label,
                remaining,
                ..
            } => {
                assert_eq!(state, CountdownState::Counting);
                assert_eq!(label, "Christmas 2025");
                assert_eq!(remaining.days, 24);
            }
            _ => panic!("Expected CountdownSnapshot"),
        }
    }

    proptest! {
        #[test]
        fn reconstitutes_to_the_second(diff in 1i64..(400 * MS_PER_DAY)) {
            let t = TimeRemaining::from_millis(diff);
            prop_assert_eq!(t.total_millis() as i64, diff - diff % MS_PER_SECOND);
            prop_assert!(t.hours < 24 && t.minutes < 60 && t.seconds < 60);
        }
    }
}
