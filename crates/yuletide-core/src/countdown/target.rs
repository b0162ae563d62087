//! Target-date resolution.
//!
//! The default target is Dec 25, 00:00 local time of the selected year. A
//! custom date bypasses that rule. The Dec 26 rollover is part of every
//! `resolve` call rather than a one-off side effect, so a selection that was
//! persisted before the rollover corrects itself on the next tick.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const CHRISTMAS_MONTH: u32 = 12;
const CHRISTMAS_DAY: u32 = 25;
const ROLLOVER_DAY: u32 = 26;

/// Dec 25, 00:00:00 of `year`, or `None` if the year is outside chrono's range.
pub fn christmas(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, CHRISTMAS_MONTH, CHRISTMAS_DAY)?.and_hms_opt(0, 0, 0)
}

/// What the user asked to count down to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSelection {
    /// Selected Christmas year. `None` means "nearest future Christmas".
    #[serde(default)]
    pub year: Option<i32>,
    /// Explicit target instant, used verbatim.
    #[serde(default)]
    pub custom_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub custom_event_name: Option<String>,
}

/// Output of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub instant: NaiveDateTime,
    /// Year the target falls in. For Christmas targets this is the year to
    /// persist back into preferences.
    pub year: i32,
    pub label: String,
    /// True when this pass advanced the selected year.
    pub rolled_over: bool,
    pub custom: bool,
}

impl TargetSelection {
    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn nearest() -> Self {
        Self::default()
    }

    pub fn custom(at: NaiveDateTime, name: Option<String>) -> Self {
        Self {
            year: None,
            custom_date: Some(at),
            custom_event_name: name,
        }
    }

    /// Compute the target instant as of `now`, applying the Dec 26 rollover.
    pub fn resolve(&mut self, now: NaiveDateTime) -> ResolvedTarget {
        if let Some(at) = self.custom_date {
            let label = self
                .custom_event_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Custom event".to_string());
            return ResolvedTarget {
                instant: at,
                year: at.year(),
                label,
                rolled_over: false,
                custom: true,
            };
        }

        let today = now.date();
        let mut rolled_over = false;

        let year = match self.year {
            Some(year) => {
                if year == today.year()
                    && today.month() == CHRISTMAS_MONTH
                    && today.day() == ROLLOVER_DAY
                {
                    tracing::info!(from = year, to = year + 1, "rolling countdown to next year");
                    self.year = Some(year + 1);
                    rolled_over = true;
                    year + 1
                } else {
                    year
                }
            }
            None => nearest_christmas_year(now),
        };

        let instant = match christmas(year) {
            Some(instant) => instant,
            None => {
                tracing::warn!(year, "selected year out of range, using nearest Christmas");
                let fallback = nearest_christmas_year(now);
                self.year = Some(fallback);
                return self.resolve(now);
            }
        };

        ResolvedTarget {
            instant,
            year,
            label: format!("Christmas {year}"),
            rolled_over,
            custom: false,
        }
    }
}

/// This year's Christmas unless it has already passed.
fn nearest_christmas_year(now: NaiveDateTime) -> i32 {
    let year = now.year();
    match christmas(year) {
        Some(this_year) if now > this_year => year + 1,
        _ => year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn selected_year_targets_dec_25_midnight() {
        let mut sel = TargetSelection::for_year(2025);
        let target = sel.resolve(at(2025, 6, 1, 12));
        assert_eq!(target.instant, at(2025, 12, 25, 0));
        assert_eq!(target.label, "Christmas 2025");
        assert!(!target.rolled_over);
    }

    #[test]
    fn dec_26_rolls_selected_year_forward() {
        let mut sel = TargetSelection::for_year(2025);
        let target = sel.resolve(at(2025, 12, 26, 9));
        assert_eq!(target.instant, at(2026, 12, 25, 0));
        assert!(target.rolled_over);
        assert_eq!(sel.year, Some(2026));

        // Already rolled: a second pass the same day keeps 2026.
        let again = sel.resolve(at(2025, 12, 26, 10));
        assert_eq!(again.instant, at(2026, 12, 25, 0));
        assert!(!again.rolled_over);
    }

    #[test]
    fn no_rollover_for_other_years() {
        let mut sel = TargetSelection::for_year(2027);
        let target = sel.resolve(at(2025, 12, 26, 9));
        assert_eq!(target.year, 2027);
        assert!(!target.rolled_over);
    }

    #[test]
    fn nearest_christmas_before_and_after() {
        let mut sel = TargetSelection::nearest();
        assert_eq!(sel.resolve(at(2025, 12, 24, 23)).year, 2025);
        assert_eq!(sel.resolve(at(2025, 12, 25, 0)).year, 2025);
        assert_eq!(sel.resolve(at(2025, 12, 25, 1)).year, 2026);
        assert_eq!(sel.year, None);
    }

    #[test]
    fn custom_date_is_used_verbatim() {
        let when = at(2026, 3, 14, 15);
        let mut sel = TargetSelection::custom(when, Some("Pi Day".into()));
        let target = sel.resolve(at(2025, 12, 26, 0));
        assert_eq!(target.instant, when);
        assert_eq!(target.label, "Pi Day");
        assert!(target.custom);
        assert!(!target.rolled_over);
    }

    #[test]
    fn blank_custom_name_gets_generic_label() {
        let mut sel = TargetSelection::custom(at(2026, 1, 1, 0), Some("  ".into()));
        assert_eq!(sel.resolve(at(2025, 1, 1, 0)).label, "Custom event");
    }
}
