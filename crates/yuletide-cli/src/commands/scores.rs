use clap::Subcommand;
use serde_json::{json, Map, Value};
use yuletide_core::{AppConfig, Event, GameKind};

use super::{open_preferences, print_json, CliResult};

#[derive(Subcommand)]
pub enum ScoresAction {
    /// Best score per game
    List,
    /// Record a score; kept only if it beats the stored best
    Submit {
        /// Game id (memory, snowflakes, decorate, sleigh, stack)
        game: GameKind,
        score: u32,
    },
}

pub fn run(action: ScoresAction) -> CliResult {
    let config = AppConfig::load_or_default();
    let prefs = open_preferences(&config)?;

    match action {
        ScoresAction::List => {
            let board: Map<String, Value> = prefs
                .load_scores()
                .entries()
                .into_iter()
                .map(|(game, best)| (game.as_str().to_string(), Value::from(best)))
                .collect();
            print_json(&board)?;
        }
        ScoresAction::Submit { game, score } => match prefs.save_score(game, score) {
            Some(previous) => print_json(&Event::HighScore {
                game,
                score,
                previous,
            })?,
            None => print_json(&json!({
                "game": game.as_str(),
                "score": score,
                "updated": false,
            }))?,
        },
    }
    Ok(())
}
