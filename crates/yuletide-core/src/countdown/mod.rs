mod engine;
mod progress;
mod target;

pub use engine::{CountdownEngine, CountdownState, TimeRemaining, MS_PER_DAY};
pub use progress::{days_until_ceil, gauges, hourly_progress, tree_progress, Gauges, TreeProgress};
pub use target::{christmas, ResolvedTarget, TargetSelection};
