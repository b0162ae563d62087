use clap::Subcommand;
use serde_json::json;
use yuletide_core::{AppConfig, GiftPlanner};

use super::{open_preferences, print_json, CliResult};

#[derive(Subcommand)]
pub enum GiftsAction {
    /// Add a gift to buy
    Add {
        name: String,
        /// Who the gift is for
        recipient: String,
    },
    /// Flip a gift's purchased flag
    Toggle {
        id: String,
    },
    /// Delete a gift
    Remove {
        id: String,
    },
    /// List gifts with purchase progress
    List,
}

pub fn run(action: GiftsAction) -> CliResult {
    let config = AppConfig::load_or_default();
    let prefs = open_preferences(&config)?;
    let planner = GiftPlanner::new(&prefs);

    match action {
        GiftsAction::Add { name, recipient } => {
            let gift = planner.add(&name, &recipient)?;
            print_json(&gift)?;
        }
        GiftsAction::Toggle { id } => {
            let gift = planner.toggle(&id)?;
            print_json(&gift)?;
        }
        GiftsAction::Remove { id } => {
            let gift = planner.remove(&id)?;
            print_json(&gift)?;
        }
        GiftsAction::List => {
            print_json(&json!({
                "gifts": planner.list(),
                "progress": planner.progress(),
            }))?;
        }
    }
    Ok(())
}
