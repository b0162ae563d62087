use chrono::Datelike;
use clap::Subcommand;
use serde_json::json;
use yuletide_core::countdown::days_until_ceil;
use yuletide_core::notify::{LogNotifier, NotificationScheduler, Permission};
use yuletide_core::{AppConfig, Clock, SystemClock};

use super::{open_preferences, print_json, CliResult};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Run one notification check now
    Check {
        /// Days remaining to check against (defaults to the live countdown)
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
    },
    /// Show which notifications were already sent, per year
    Status,
    /// Turn notifications on, asking for permission if needed
    Enable,
    /// Turn notifications off
    Disable,
}

pub fn run(action: NotifyAction) -> CliResult {
    let config = AppConfig::load_or_default();
    let prefs = open_preferences(&config)?;
    let now = SystemClock.now();

    match action {
        NotifyAction::Check { days } => {
            let stored = prefs.load();
            let days = match days {
                Some(days) => days,
                None => {
                    let target = stored.target_selection(now.year()).resolve(now);
                    days_until_ceil(target.instant, now)
                }
            };

            let scheduler = NotificationScheduler::new(&prefs);
            let sent = scheduler.check(
                days,
                stored.notifications_enabled(),
                &stored.messages(),
                &mut LogNotifier,
                now,
            );
            match sent {
                Some(event) => print_json(&event)?,
                None => print_json(&json!({
                    "type": "NoNotification",
                    "days_remaining": days,
                    "enabled": stored.notifications_enabled(),
                }))?,
            }
        }
        NotifyAction::Enable => {
            let permission = NotificationScheduler::new(&prefs).enable(&mut LogNotifier);
            print_json(&json!({
                "permission": permission,
                "enabled": permission == Permission::Granted,
            }))?;
        }
        NotifyAction::Disable => {
            NotificationScheduler::new(&prefs).disable();
            print_json(&json!({ "enabled": false }))?;
        }
        NotifyAction::Status => {
            let years: Vec<_> = prefs
                .notification_years()
                .into_iter()
                .map(|year| json!({ "year": year, "sent": prefs.load_notification_state(year) }))
                .collect();
            print_json(&years)?;
        }
    }
    Ok(())
}
