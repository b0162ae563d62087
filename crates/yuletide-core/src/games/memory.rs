//! Memory match: find the eight emoji pairs in as few moves as possible.

use rand::seq::SliceRandom;
use serde::Serialize;

use super::arcade::{ArcadePolicy, GameRng, LoopTiming};
use super::arena::{Arena, EntityId};
use super::{GameKind, GameOutcome};
use crate::error::ValidationError;

pub const CARD_EMOJI: [&str; 8] = ["🎄", "🎅", "🎁", "⛄", "🔔", "🕯️", "🦌", "⭐"];

const MATCH_DELAY_MS: u64 = 500;
const MISMATCH_DELAY_MS: u64 = 1_000;
const STEP_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub emoji: &'static str,
    pub flipped: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryInput {
    /// Reveal the card at this board position.
    Flip(usize),
}

#[derive(Debug, Clone, Copy)]
struct PendingPair {
    first: EntityId,
    second: EntityId,
    is_match: bool,
    wait_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryMatch {
    cards: Arena<Card>,
    revealed: Option<EntityId>,
    pending: Option<PendingPair>,
    moves: u32,
    pairs_found: usize,
    won: bool,
}

impl MemoryMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &Arena<Card> {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn pairs_found(&self) -> usize {
        self.pairs_found
    }

    /// Whether a revealed pair is waiting to be matched or flipped back.
    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    fn resolve(&mut self, pair: PendingPair) -> Option<GameOutcome> {
        for id in [pair.first, pair.second] {
            if let Some(card) = self.cards.get_mut(id) {
                if pair.is_match {
                    card.matched = true;
                } else {
                    card.flipped = false;
                }
            }
        }
        if !pair.is_match {
            return None;
        }
        self.pairs_found += 1;
        if self.pairs_found == CARD_EMOJI.len() {
            self.won = true;
            return Some(GameOutcome::Won);
        }
        None
    }
}

impl ArcadePolicy for MemoryMatch {
    type Input = MemoryInput;

    const KIND: GameKind = GameKind::MemoryMatch;

    fn timing(&self) -> LoopTiming {
        LoopTiming {
            step_every_ms: Some(STEP_MS),
            ..LoopTiming::default()
        }
    }

    fn reset(&mut self, rng: &mut GameRng) {
        let mut deck: Vec<&'static str> = CARD_EMOJI.iter().chain(CARD_EMOJI.iter()).copied().collect();
        deck.shuffle(rng);

        *self = Self::default();
        for emoji in deck {
            self.cards.insert(Card {
                emoji,
                flipped: false,
                matched: false,
            });
        }
    }

    fn step(&mut self) -> Option<GameOutcome> {
        let mut pair = self.pending?;
        pair.wait_ms = pair.wait_ms.saturating_sub(STEP_MS);
        if pair.wait_ms > 0 {
            self.pending = Some(pair);
            return None;
        }
        self.pending = None;
        self.resolve(pair)
    }

    fn validate(&self, input: &MemoryInput) -> Result<(), ValidationError> {
        let MemoryInput::Flip(index) = *input;
        if index >= self.cards.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "cards".into(),
                index,
                len: self.cards.len(),
            });
        }
        Ok(())
    }

    fn handle(&mut self, input: MemoryInput) -> Option<GameOutcome> {
        let MemoryInput::Flip(index) = input;
        if self.pending.is_some() {
            return None;
        }
        let Some((id, card)) = self.cards.nth(index) else {
            tracing::debug!(index, "flip outside the board ignored");
            return None;
        };
        if card.flipped || card.matched {
            return None;
        }
        let emoji = card.emoji;
        if let Some(card) = self.cards.get_mut(id) {
            card.flipped = true;
        }

        match self.revealed.take() {
            None => self.revealed = Some(id),
            Some(first) => {
                self.moves += 1;
                let is_match = self.cards.get(first).is_some_and(|c| c.emoji == emoji);
                self.pending = Some(PendingPair {
                    first,
                    second: id,
                    is_match,
                    wait_ms: if is_match {
                        MATCH_DELAY_MS
                    } else {
                        MISMATCH_DELAY_MS
                    },
                });
            }
        }
        None
    }

    /// `max(0, 1000 - moves * 10)` once every pair is found.
    fn score(&self) -> u32 {
        if self.won {
            1_000u32.saturating_sub(self.moves * 10)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{ArcadeLoop, GamePhase};

    fn started(seed: u64) -> ArcadeLoop<MemoryMatch> {
        let mut game = ArcadeLoop::with_seed(MemoryMatch::new(), seed);
        game.start();
        game
    }

    /// Board positions grouped by emoji.
    fn pairs(game: &ArcadeLoop<MemoryMatch>) -> Vec<(usize, usize)> {
        let emojis: Vec<_> = game.policy().cards().iter().map(|(_, c)| c.emoji).collect();
        CARD_EMOJI
            .iter()
            .map(|e| {
                let mut at = emojis.iter().enumerate().filter(|(_, x)| *x == e).map(|(i, _)| i);
                (at.next().unwrap(), at.next().unwrap())
            })
            .collect()
    }

    fn mismatched(game: &ArcadeLoop<MemoryMatch>) -> (usize, usize) {
        let p = pairs(game);
        (p[0].0, p[1].0)
    }

    #[test]
    fn flip_past_the_board_is_rejected() {
        let mut game = started(3);
        match game.try_send(MemoryInput::Flip(16)) {
            Err(ValidationError::OutOfBounds { index, len, .. }) => {
                assert_eq!((index, len), (16, 16));
            }
            other => panic!("Expected OutOfBounds, got {other:?}"),
        }
        assert!(game.try_send(MemoryInput::Flip(15)).is_ok());
        assert_eq!(game.policy().cards().iter().filter(|(_, c)| c.flipped).count(), 1);
    }

    #[test]
    fn deck_holds_every_emoji_twice() {
        let game = started(3);
        assert_eq!(game.policy().cards().len(), 16);
        assert_eq!(pairs(&game).len(), 8);
    }

    #[test]
    fn mismatch_flips_back_after_a_second() {
        let mut game = started(3);
        let (a, b) = mismatched(&game);
        game.send(MemoryInput::Flip(a));
        game.send(MemoryInput::Flip(b));
        assert_eq!(game.policy().moves(), 1);

        game.advance(950);
        assert!(game.policy().cards().nth(a).unwrap().1.flipped);
        game.advance(50);
        assert!(!game.policy().cards().nth(a).unwrap().1.flipped);
        assert!(!game.policy().cards().nth(b).unwrap().1.flipped);
    }

    #[test]
    fn third_flip_while_resolving_is_ignored() {
        let mut game = started(3);
        let p = pairs(&game);
        game.send(MemoryInput::Flip(p[0].0));
        game.send(MemoryInput::Flip(p[1].0));
        game.send(MemoryInput::Flip(p[2].0));
        assert!(!game.policy().cards().nth(p[2].0).unwrap().1.flipped);
        assert_eq!(game.policy().moves(), 1);
    }

    #[test]
    fn twelve_moves_scores_880() {
        let mut game = started(11);
        let (a, b) = mismatched(&game);
        for _ in 0..4 {
            game.send(MemoryInput::Flip(a));
            game.send(MemoryInput::Flip(b));
            game.advance(1_000);
        }

        let mut finished = None;
        for (x, y) in pairs(&game) {
            game.send(MemoryInput::Flip(x));
            game.send(MemoryInput::Flip(y));
            finished = game.advance(500);
        }

        assert!(finished.is_some());
        assert_eq!(game.policy().moves(), 12);
        assert_eq!(game.phase(), GamePhase::Finished(GameOutcome::Won));
        assert_eq!(game.score(), 880);
    }

    #[test]
    fn flipping_a_matched_card_is_ignored() {
        let mut game = started(5);
        let (x, y) = pairs(&game)[0];
        game.send(MemoryInput::Flip(x));
        game.send(MemoryInput::Flip(y));
        game.advance(500);
        assert_eq!(game.policy().pairs_found(), 1);

        game.send(MemoryInput::Flip(x));
        assert!(!game.policy().is_resolving());
        game.send(MemoryInput::Flip(99));
        assert_eq!(game.policy().moves(), 1);
    }
}
