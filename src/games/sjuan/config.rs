//! Sjuan match configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{standard_deck, Card};

/// Configuration for one Sjuan match.
///
/// Usually built with `SjuanGameBuilder`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SjuanConfig {
    /// Number of players at the deal (1-8).
    pub player_count: usize,

    /// Seed for the shuffle and the starting player.
    pub seed: u64,

    /// Cards dealt, in stack order before shuffling.
    pub deck: Vec<Card>,

    /// Shuffle the deck before dealing.
    pub shuffle: bool,

    /// Whether a player may skip at any point of their turn. When false,
    /// skipping is only allowed after an Ace or King grants an extra move.
    pub always_skippable: bool,

    /// How many cards the previous player hands over when someone succumbs.
    pub cards_to_give: usize,

    /// Fixed starting player. `None` picks one at random.
    pub first_player: Option<usize>,
}

impl Default for SjuanConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            seed: 0,
            deck: standard_deck(),
            shuffle: true,
            always_skippable: true,
            cards_to_give: 3,
            first_player: None,
        }
    }
}

impl SjuanConfig {
    /// Whether some card appears more than once in the deck.
    #[must_use]
    pub fn deck_has_repeats(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.deck.len());
        !self.deck.iter().all(|card| seen.insert(*card))
    }
}
