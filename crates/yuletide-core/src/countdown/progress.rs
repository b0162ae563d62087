//! Display gauges derived from the clock.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::engine::MS_PER_DAY;

/// Tree-decoration gauge for Christmas Eve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeProgress {
    /// True from Dec 24 00:00 up to (not including) Dec 25 00:00.
    pub in_eve_window: bool,
    /// 0.0 ..= 100.0
    pub percent: f64,
}

/// Only the first hour of Dec 24 ramps; the rest of the eve pins to 100.
pub fn tree_progress(now: NaiveDateTime) -> TreeProgress {
    if now.month() != 12 || now.day() != 24 {
        return TreeProgress {
            in_eve_window: false,
            percent: 0.0,
        };
    }

    let percent = if now.hour() == 0 {
        let elapsed = now.minute() * 60 + now.second();
        f64::from(elapsed) / 3600.0 * 100.0
    } else {
        100.0
    };

    TreeProgress {
        in_eve_window: true,
        percent,
    }
}

/// Progress through the current hour, 0.0 .. 100.0.
pub fn hourly_progress(now: NaiveDateTime) -> f64 {
    let elapsed = now.minute() * 60 + now.second();
    f64::from(elapsed) / 3600.0 * 100.0
}

/// Both gauges read at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gauges {
    pub at: NaiveDateTime,
    pub tree: TreeProgress,
    pub hourly_percent: f64,
}

pub fn gauges(now: NaiveDateTime) -> Gauges {
    Gauges {
        at: now,
        tree: tree_progress(now),
        hourly_percent: hourly_progress(now),
    }
}

/// Whole days until `target`, rounded up. Negative once the target has passed.
pub fn days_until_ceil(target: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let diff = (target - now).num_milliseconds();
    -((-diff).div_euclid(MS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn gauges_serialize_as_one_record() {
        let g = gauges(at(12, 24, 0, 15, 0));
        assert_eq!(g.tree.percent, 25.0);
        assert_eq!(g.hourly_percent, 25.0);

        let json = serde_json::to_value(g).unwrap();
        assert_eq!(json["tree"]["in_eve_window"], true);
        assert_eq!(json["hourly_percent"], 25.0);
        assert_eq!(json["at"], "2025-12-24T00:15:00");
    }

    #[test]
    fn first_hour_of_eve_ramps() {
        let p = tree_progress(at(12, 24, 0, 30, 0));
        assert!(p.in_eve_window);
        assert!((p.percent - 50.0).abs() < 1e-9);
        assert_eq!(tree_progress(at(12, 24, 0, 0, 0)).percent, 0.0);
    }

    #[test]
    fn rest_of_eve_pins_to_full() {
        assert_eq!(tree_progress(at(12, 24, 1, 0, 0)).percent, 100.0);
        assert_eq!(tree_progress(at(12, 24, 23, 59, 59)).percent, 100.0);
    }

    #[test]
    fn outside_window_resets() {
        let p = tree_progress(at(12, 25, 0, 0, 0));
        assert!(!p.in_eve_window);
        assert_eq!(p.percent, 0.0);
        assert_eq!(tree_progress(at(12, 23, 23, 59, 59)).percent, 0.0);
        assert_eq!(tree_progress(at(11, 24, 0, 30, 0)).percent, 0.0);
    }

    #[test]
    fn hourly_gauge() {
        assert!((hourly_progress(at(3, 1, 7, 15, 0)) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn days_round_up() {
        let target = at(12, 25, 0, 0, 0);
        assert_eq!(days_until_ceil(target, at(12, 18, 0, 0, 0)), 7);
        assert_eq!(days_until_ceil(target, at(12, 18, 0, 0, 1)), 7);
        assert_eq!(days_until_ceil(target, at(12, 17, 23, 59, 59)), 8);
        assert_eq!(days_until_ceil(target, target), 0);
        assert_eq!(days_until_ceil(target, at(12, 26, 12, 0, 0)), -1);
    }
}
