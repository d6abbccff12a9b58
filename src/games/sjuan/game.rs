//! Sjuan match facade and builder.

use tracing::info;

use super::config::SjuanConfig;
use super::moves::{SjuanAction, SjuanMove};
use super::rules::{CandidateMove, MoveInfo, SjuanRules};
use super::state::{CollectionEvents, SjuanEvent, SjuanSnapshot, SjuanState};
use crate::core::{Card, SnapshotError};
use crate::rules::RulesEngine;

/// A Sjuan match: the rules together with the state they govern.
#[derive(Clone, Debug)]
pub struct SjuanGame {
    rules: SjuanRules,
    state: SjuanState,
}

/// Builder for creating a SjuanGame.
pub struct SjuanGameBuilder {
    config: SjuanConfig,
}

impl Default for SjuanGameBuilder {
    fn default() -> Self {
        Self {
            config: SjuanConfig::default(),
        }
    }
}

impl SjuanGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((1..=8).contains(&count), "Player count must be 1-8");
        self.config.player_count = count;
        self
    }

    /// Replace the standard deck.
    pub fn deck(mut self, deck: Vec<Card>) -> Self {
        self.config.deck = deck;
        self
    }

    /// Deal the deck in the order given.
    pub fn unshuffled(mut self) -> Self {
        self.config.shuffle = false;
        self
    }

    pub fn always_skippable(mut self, skippable: bool) -> Self {
        self.config.always_skippable = skippable;
        self
    }

    pub fn cards_to_give(mut self, count: usize) -> Self {
        assert!(count > 0, "Must give at least 1 card");
        self.config.cards_to_give = count;
        self
    }

    pub fn first_player(mut self, index: usize) -> Self {
        assert!(index < self.config.player_count, "First player out of range");
        self.config.first_player = Some(index);
        self
    }

    /// Build the game with the deal queued.
    pub fn build(mut self, seed: u64) -> SjuanGame {
        self.config.seed = seed;
        SjuanGame::new(self.config)
    }
}

impl SjuanGame {
    #[must_use]
    pub fn new(config: SjuanConfig) -> Self {
        info!(
            players = config.player_count,
            seed = config.seed,
            cards = config.deck.len(),
            "new sjuan match"
        );
        Self {
            rules: SjuanRules,
            state: SjuanState::new(config),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &SjuanRules {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &SjuanState {
        &self.state
    }

    /// Apply a batch atomically. Returns `false` if it was illegal.
    pub fn do_moves(&mut self, moves: &[SjuanMove]) -> bool {
        self.rules.do_moves(moves, &mut self.state)
    }

    /// Apply a single move.
    pub fn play(&mut self, mv: SjuanMove) -> bool {
        self.do_moves(&[mv])
    }

    pub fn is_valid(&mut self, moves: &[SjuanMove]) -> bool {
        self.rules.move_is_valid(moves, &mut self.state)
    }

    pub fn move_info(&mut self, moves: &[SjuanMove]) -> MoveInfo {
        self.rules.move_info(moves, &mut self.state)
    }

    #[must_use]
    pub fn moves_for_card(&self, card_index: usize) -> Vec<CandidateMove> {
        self.rules.moves_for_card(card_index, &self.state)
    }

    #[must_use]
    pub fn available_actions(&self) -> Vec<SjuanAction> {
        self.rules.available_actions(&self.state)
    }

    /// Apply everything still queued as one batch.
    ///
    /// Returns `false` if nothing was queued.
    pub fn finish_deal(&mut self) -> bool {
        if !self.state.phase().is_do_queue() || self.state.queue().is_empty() {
            return false;
        }
        let queued: Vec<SjuanMove> = self.state.queue().iter().cloned().collect();
        self.do_moves(&queued)
    }

    pub fn drain_events(&mut self) -> Vec<SjuanEvent> {
        self.state.drain_events()
    }

    pub fn drain_collection_events(&mut self) -> CollectionEvents {
        self.state.drain_collection_events()
    }

    /// Start over with a fresh shuffle and a new deal.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    #[must_use]
    pub fn snapshot(&self) -> SjuanSnapshot {
        self.state.get_state()
    }

    pub fn restore(&mut self, snapshot: SjuanSnapshot) -> Result<(), SnapshotError> {
        self.state.set_state(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sjuan::Phase;

    #[test]
    fn test_builder_defaults() {
        let game = SjuanGameBuilder::new().build(7);
        assert_eq!(game.state().player_count(), 4);
        assert_eq!(game.state().config().seed, 7);
        assert_eq!(game.state().config().cards_to_give, 3);
        assert!(game.state().config().shuffle);
    }

    #[test]
    #[should_panic(expected = "Player count must be 1-8")]
    fn test_builder_rejects_empty_table() {
        let _ = SjuanGameBuilder::new().player_count(0);
    }

    #[test]
    #[should_panic(expected = "Player count must be 1-8")]
    fn test_builder_rejects_crowded_table() {
        let _ = SjuanGameBuilder::new().player_count(9);
    }

    #[test]
    #[should_panic(expected = "Must give at least 1 card")]
    fn test_builder_rejects_zero_gift() {
        let _ = SjuanGameBuilder::new().cards_to_give(0);
    }

    #[test]
    #[should_panic(expected = "Must give at least 1 card")]
    fn test_new_checks_hand_built_config() {
        let _ = SjuanGame::new(SjuanConfig {
            cards_to_give: 0,
            ..SjuanConfig::default()
        });
    }

    #[test]
    fn test_finish_deal() {
        let mut game = SjuanGameBuilder::new().player_count(3).first_player(2).build(1);

        assert!(game.finish_deal());
        assert_eq!(game.state().phase(), &Phase::PlayerTurn(2));
        let sizes: Vec<usize> = game.state().players().iter().map(|h| h.len()).collect();
        assert_eq!(sizes, vec![18, 17, 17]);

        assert!(!game.finish_deal());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut game = SjuanGameBuilder::new().player_count(2).build(5);
        game.finish_deal();
        let saved = game.snapshot();

        game.play(SjuanMove::Action(SjuanAction::Skip));
        assert_ne!(game.snapshot(), saved);

        game.restore(saved.clone()).unwrap();
        assert_eq!(game.snapshot(), saved);
    }
}
