use std::time::Duration;

use chrono::Datelike;
use yuletide_core::countdown::{self, days_until_ceil};
use yuletide_core::notify::{LogNotifier, NotificationScheduler};
use yuletide_core::{
    AppConfig, Clock, CountdownEngine, Event, KeyValueStore, PreferenceStore, Preferences,
    SystemClock, TargetSelection,
};

use super::{open_preferences, print_json, CliResult};

pub fn run(year: Option<i32>, watch: bool, ticks: Option<u64>) -> CliResult {
    let config = AppConfig::load_or_default();
    let prefs = open_preferences(&config)?;

    let clock = SystemClock;
    let selection = match year {
        Some(year) => TargetSelection::for_year(year),
        None => prefs.load().target_selection(clock.now().year()),
    };
    // Only a selection that came from preferences is written back on rollover.
    let persist = year.is_none();
    let mut engine = CountdownEngine::new(clock, selection);

    if !watch {
        for event in engine.tick() {
            record_rollover(&prefs, &event, persist);
            print_json(&event)?;
        }
        return print_json(&engine.snapshot());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(watch_loop(engine, &prefs, &config, ticks, persist))
}

/// Tick once per `countdown.tick_ms` and check notifications every
/// `countdown.notification_check_secs`, printing one JSON line per event.
async fn watch_loop<S: KeyValueStore>(
    mut engine: CountdownEngine<SystemClock>,
    prefs: &PreferenceStore<S>,
    config: &AppConfig,
    ticks: Option<u64>,
    persist: bool,
) -> CliResult {
    let tick_period = Duration::from_millis(config.countdown.tick_ms.max(1));
    let check_period = Duration::from_secs(config.countdown.notification_check_secs.max(1));
    let mut tick = tokio::time::interval(tick_period);
    let mut check = tokio::time::interval(check_period);

    let scheduler = NotificationScheduler::new(prefs);
    let mut notifier = LogNotifier;
    let mut remaining = ticks;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                for event in engine.tick() {
                    record_rollover(prefs, &event, persist);
                    println!("{}", serde_json::to_string(&event)?);
                }
                println!("{}", serde_json::to_string(&engine.snapshot())?);

                if let Some(n) = remaining.as_mut() {
                    *n = n.saturating_sub(1);
                    if *n == 0 {
                        break;
                    }
                }
            }
            _ = check.tick() => {
                let Some(target) = engine.target() else { continue };
                let now = engine.clock().now();
                let stored = prefs.load();
                let days = days_until_ceil(target.instant, now);
                if let Some(event) = scheduler.check(
                    days,
                    stored.notifications_enabled(),
                    &stored.messages(),
                    &mut notifier,
                    now,
                ) {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }
        }
    }
    Ok(())
}

fn record_rollover<S: KeyValueStore>(prefs: &PreferenceStore<S>, event: &Event, persist: bool) {
    if let (true, Event::YearRolledOver { to_year, .. }) = (persist, event) {
        prefs.save(&Preferences {
            selected_year: Some(*to_year),
            ..Preferences::default()
        });
    }
}

pub fn tree_progress() -> CliResult {
    print_json(&countdown::gauges(SystemClock.now()))
}
