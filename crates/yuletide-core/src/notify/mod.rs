//! Countdown notifications at the 7/3/1-day marks.
//!
//! The decision is an exact-equality check on the days-remaining value: a
//! check that never observes `7` (say the app was closed that day) skips the
//! one-week notification for that year for good. Sent flags are stored per
//! calendar year and are never cleaned up.

mod notifier;

pub use notifier::{LogNotifier, MemoryNotifier, Notifier, Permission};

use std::fmt;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::storage::{KeyValueStore, NotificationMessages, PreferenceStore, Preferences};

pub const NOTIFICATION_TITLE: &str = "Christmas Countdown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Threshold {
    OneWeek,
    ThreeDays,
    OneDay,
}

impl Threshold {
    pub const ALL: [Threshold; 3] = [Threshold::OneWeek, Threshold::ThreeDays, Threshold::OneDay];

    pub fn days(&self) -> i64 {
        match self {
            Threshold::OneWeek => 7,
            Threshold::ThreeDays => 3,
            Threshold::OneDay => 1,
        }
    }

    pub fn from_days(days: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.days() == days)
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Threshold::OneWeek => "🎄 Only 1 week until Christmas!",
            Threshold::ThreeDays => "🎅 Just 3 days left until Christmas!",
            Threshold::OneDay => "🎁 Christmas is tomorrow!",
        }
    }

    /// User text when non-blank, otherwise the default.
    pub fn message<'a>(&self, custom: &'a NotificationMessages) -> &'a str {
        let text = match self {
            Threshold::OneWeek => custom.one_week.as_str(),
            Threshold::ThreeDays => custom.three_days.as_str(),
            Threshold::OneDay => custom.one_day.as_str(),
        };
        if text.trim().is_empty() {
            self.default_message()
        } else {
            text
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::OneWeek => f.write_str("one week"),
            Threshold::ThreeDays => f.write_str("three days"),
            Threshold::OneDay => f.write_str("one day"),
        }
    }
}

/// Which thresholds already fired in a given year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSentState {
    #[serde(default)]
    pub one_week: bool,
    #[serde(default)]
    pub three_days: bool,
    #[serde(default)]
    pub one_day: bool,
}

impl NotificationSentState {
    pub fn is_sent(&self, threshold: Threshold) -> bool {
        match threshold {
            Threshold::OneWeek => self.one_week,
            Threshold::ThreeDays => self.three_days,
            Threshold::OneDay => self.one_day,
        }
    }

    pub fn mark_sent(&mut self, threshold: Threshold) {
        match threshold {
            Threshold::OneWeek => self.one_week = true,
            Threshold::ThreeDays => self.three_days = true,
            Threshold::OneDay => self.one_day = true,
        }
    }
}

/// Pure decision: the threshold to fire now, if any.
pub fn due_threshold(
    days_remaining: i64,
    enabled: bool,
    permission_granted: bool,
    sent: &NotificationSentState,
) -> Option<Threshold> {
    if !enabled || !permission_granted {
        return None;
    }
    Threshold::from_days(days_remaining).filter(|t| !sent.is_sent(*t))
}

/// Applies [`due_threshold`] against persisted flags and dispatches through a [`Notifier`].
pub struct NotificationScheduler<'a, S: KeyValueStore> {
    store: &'a PreferenceStore<S>,
}

impl<'a, S: KeyValueStore> NotificationScheduler<'a, S> {
    pub fn new(store: &'a PreferenceStore<S>) -> Self {
        Self { store }
    }

    /// Switch notifications on. Permission is requested first when it has not
    /// been decided; the setting stays off unless it ends up granted.
    pub fn enable<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Permission {
        let permission = match notifier.permission() {
            Permission::Prompt => notifier.request_permission(),
            decided => decided,
        };
        if permission == Permission::Granted {
            self.set_enabled(true);
        } else {
            tracing::info!(?permission, "notifications left off");
        }
        permission
    }

    pub fn disable(&self) {
        self.set_enabled(false);
    }

    fn set_enabled(&self, enabled: bool) {
        self.store.save(&Preferences {
            notifications_enabled: Some(enabled),
            ..Preferences::default()
        });
    }

    /// Run one check. The flag is persisted immediately after dispatch.
    pub fn check<N: Notifier + ?Sized>(
        &self,
        days_remaining: i64,
        enabled: bool,
        messages: &NotificationMessages,
        notifier: &mut N,
        now: NaiveDateTime,
    ) -> Option<Event> {
        if !enabled {
            return None;
        }
        let granted = notifier.permission() == Permission::Granted;
        if !granted {
            tracing::debug!("notification permission not granted, skipping check");
            return None;
        }

        let year = now.year();
        let mut sent = self.store.load_notification_state(year);
        let threshold = due_threshold(days_remaining, enabled, granted, &sent)?;

        let body = threshold.message(messages).to_string();
        notifier.show(NOTIFICATION_TITLE, &body);
        sent.mark_sent(threshold);
        self.store.save_notification_state(year, &sent);
        tracing::info!(%threshold, year, "countdown notification sent");

        Some(Event::NotificationSent {
            threshold,
            year,
            title: NOTIFICATION_TITLE.to_string(),
            body,
            at: now,
        })
    }
}
