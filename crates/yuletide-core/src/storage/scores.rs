use serde::{Deserialize, Serialize};

use crate::games::GameKind;

/// Best score per scored mini-game. No history is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScores {
    #[serde(default)]
    pub memory_gif: u32,
    #[serde(default)]
    pub catch_snowflakes: u32,
    #[serde(default)]
    pub decorate_tree: u32,
    #[serde(default)]
    pub santa_sleigh: u32,
    #[serde(default)]
    pub candy_cane_stack: u32,
}

impl GameScores {
    /// Stored best for `game`; `None` for games without a score slot.
    pub fn get(&self, game: GameKind) -> Option<u32> {
        match game {
            GameKind::MemoryMatch => Some(self.memory_gif),
            GameKind::CatchSnowflakes => Some(self.catch_snowflakes),
            GameKind::DecorateTree => Some(self.decorate_tree),
            GameKind::SleighRide => Some(self.santa_sleigh),
            GameKind::CandyCaneStack => Some(self.candy_cane_stack),
            GameKind::SnowmanBuilder => None,
        }
    }

    pub(crate) fn set(&mut self, game: GameKind, score: u32) {
        let slot = match game {
            GameKind::MemoryMatch => &mut self.memory_gif,
            GameKind::CatchSnowflakes => &mut self.catch_snowflakes,
            GameKind::DecorateTree => &mut self.decorate_tree,
            GameKind::SleighRide => &mut self.santa_sleigh,
            GameKind::CandyCaneStack => &mut self.candy_cane_stack,
            GameKind::SnowmanBuilder => return,
        };
        *slot = score;
    }

    /// `(game, best)` pairs in display order.
    pub fn entries(&self) -> Vec<(GameKind, u32)> {
        GameKind::ALL
            .iter()
            .filter_map(|&g| self.get(g).map(|s| (g, s)))
            .collect()
    }
}
