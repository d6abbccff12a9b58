//! Sjuan match state.
//!
//! ## Contents
//!
//! - One `Hand` per remaining player, plus the seat each player was dealt
//!   at (indices shift when players leave; seats do not)
//! - The shuffled source stack and the shared `SuitLadder`
//! - A FIFO queue of pending moves (the deal)
//! - The current `Phase` and the derived `can_skip`/`can_succumb` flags
//!
//! ## Events
//!
//! Changes are reported pull-style: the state records `SjuanEvent`s and the
//! caller drains them after each batch. Nothing calls back into user code
//! while the state is being mutated.
//!
//! All mutation goes through `SjuanRules`; this module only exposes the
//! primitive transitions the rules are built from.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::SjuanConfig;
use super::ladder::SuitLadder;
use super::moves::{SjuanInsert, SjuanMove, SjuanTake};
use super::phase::Phase;
use crate::collections::{
    CardCollection, CardStack, EventOf, Hand, HandInsert, StackAction, StackTake,
};
use crate::core::{Card, GameRng, GameRngState, SnapshotError, Suit};
use crate::rules::{Move, MoveBatch, Snapshot};

/// Something that happened to the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SjuanEvent {
    /// A legal batch was applied.
    MoveApplied { moves: MoveBatch<super::SjuanAction, SjuanTake, SjuanInsert> },
    /// The phase changed at a turn boundary.
    TurnChanged { phase: Phase },
    /// The player at `index` emptied their hand and left the match.
    Won { index: usize, seat: usize },
    SkippableChanged(bool),
    SuccumbableChanged(bool),
}

/// Pending collection events, drained together.
#[derive(Clone, Debug, Default)]
pub struct CollectionEvents {
    pub hands: Vec<Vec<EventOf<Hand>>>,
    pub source_stack: Vec<EventOf<CardStack>>,
    pub ladder: Vec<EventOf<SuitLadder>>,
}

/// Mutable state of one Sjuan match.
#[derive(Clone, Debug)]
pub struct SjuanState {
    config: SjuanConfig,
    players: Vec<Hand>,
    seats: Vec<usize>,
    source_stack: CardStack,
    ladder: SuitLadder,
    queue: Vector<SjuanMove>,
    phase: Phase,
    can_skip: bool,
    can_succumb: bool,
    finish_order: Vec<usize>,
    rng: GameRng,
    events: Vec<SjuanEvent>,
}

impl SjuanState {
    /// Shuffle the deck and queue the deal.
    #[must_use]
    pub fn new(config: SjuanConfig) -> Self {
        assert!(
            (1..=8).contains(&config.player_count),
            "Player count must be 1-8"
        );
        assert!(config.cards_to_give > 0, "Must give at least 1 card");

        let rng = GameRng::new(config.seed);
        let mut state = Self {
            players: Vec::new(),
            seats: Vec::new(),
            source_stack: CardStack::default(),
            ladder: SuitLadder::new(),
            queue: Vector::new(),
            phase: Phase::start(0),
            can_skip: false,
            can_succumb: false,
            finish_order: Vec::new(),
            rng,
            events: Vec::new(),
            config,
        };
        state.deal();
        state
    }

    /// Start the match over with a fresh shuffle.
    ///
    /// The RNG is not reseeded, so consecutive resets give different deals.
    pub fn reset(&mut self) {
        self.deal();
    }

    fn deal(&mut self) {
        let n = self.config.player_count;

        let duplicates = self.config.deck_has_repeats();
        self.players = (0..n).map(|_| seat_hand(None, duplicates)).collect();
        self.seats = (0..n).collect();
        self.ladder = SuitLadder::new();
        self.finish_order.clear();
        self.events.clear();

        self.source_stack = CardStack::new(self.config.deck.iter().copied());
        if self.config.shuffle {
            self.source_stack.do_action(&StackAction::Shuffle, &mut self.rng);
        }

        self.queue = (0..self.config.deck.len())
            .map(|i| {
                Move::FromTo(
                    SjuanTake::SourceStack(StackTake::Top),
                    SjuanInsert::Player(i % n, HandInsert(0)),
                )
            })
            .collect();

        let first = match self.config.first_player {
            Some(first) => first % n,
            None => self.rng.gen_range_usize(0..n),
        };
        self.phase = Phase::start(first);
        self.can_skip = false;
        self.can_succumb = false;

        debug!(players = n, cards = self.queue.len(), first, "dealing");
        if self.queue.is_empty() {
            self.advance_phase();
        }
    }

    // === Read Access ===

    #[must_use]
    pub fn config(&self) -> &SjuanConfig {
        &self.config
    }

    #[must_use]
    pub fn players(&self) -> &[Hand] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat (index at the deal) of each remaining player.
    #[must_use]
    pub fn seats(&self) -> &[usize] {
        &self.seats
    }

    #[must_use]
    pub fn source_stack(&self) -> &CardStack {
        &self.source_stack
    }

    #[must_use]
    pub fn ladder(&self) -> &SuitLadder {
        &self.ladder
    }

    #[must_use]
    pub fn queue(&self) -> &Vector<SjuanMove> {
        &self.queue
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn can_skip(&self) -> bool {
        self.can_skip
    }

    #[must_use]
    pub fn can_succumb(&self) -> bool {
        self.can_succumb
    }

    /// Seats of the players who have emptied their hands, first winner first.
    #[must_use]
    pub fn finish_order(&self) -> &[usize] {
        &self.finish_order
    }

    /// The match is over once at most one player is left.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.players.len() <= 1
    }

    /// Index of the player who acts in the current phase, if they exist.
    #[must_use]
    pub fn turn_index(&self) -> Option<usize> {
        let i = self.phase.turn_index();
        (i < self.players.len()).then_some(i)
    }

    /// `i` moved `n` seats along the current table.
    #[must_use]
    pub fn turn_incr(&self, i: usize, n: isize) -> usize {
        let len = self.players.len().max(1) as isize;
        (i as isize + n).rem_euclid(len) as usize
    }

    /// Remove and return all pending match events.
    pub fn drain_events(&mut self) -> Vec<SjuanEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove and return all pending collection events.
    pub fn drain_collection_events(&mut self) -> CollectionEvents {
        CollectionEvents {
            hands: self.players.iter_mut().map(Hand::drain_events).collect(),
            source_stack: self.source_stack.drain_events(),
            ladder: self.ladder.drain_events(),
        }
    }

    // === Routing Access ===

    pub(crate) fn hand_mut(&mut self, index: usize) -> Option<&mut Hand> {
        self.players.get_mut(index)
    }

    pub(crate) fn source_stack_mut(&mut self) -> &mut CardStack {
        &mut self.source_stack
    }

    pub(crate) fn ladder_mut(&mut self) -> &mut SuitLadder {
        &mut self.ladder
    }

    // === Transitions ===

    pub(crate) fn pop_queue(&mut self) -> Option<SjuanMove> {
        self.queue.pop_front()
    }

    pub(crate) fn push_event(&mut self, event: SjuanEvent) {
        self.events.push(event);
    }

    /// End the current phase.
    ///
    /// A `DoQueue` with nothing queued settles straight into the phase it
    /// wraps.
    pub(crate) fn advance_phase(&mut self) {
        let n = self.players.len();
        let mut phase = self.phase.next(n);
        while phase.is_do_queue() && self.queue.is_empty() {
            phase = phase.next(n);
        }
        self.enter_phase(phase);
    }

    /// Player `asker` succumbed: the player before them must give cards.
    pub(crate) fn enter_give_cards(&mut self, asker: usize) {
        let giver = self.turn_incr(asker, -1);
        self.set_can_succumb(false);
        self.enter_phase(Phase::GiveCards(giver, self.config.cards_to_give));
    }

    fn enter_phase(&mut self, phase: Phase) {
        debug!(from = %self.phase, to = %phase, "phase change");
        self.phase = phase;
        self.refresh_flags();
        self.events.push(SjuanEvent::TurnChanged {
            phase: self.phase.clone(),
        });
    }

    fn refresh_flags(&mut self) {
        let turn = self.phase.is_player_turn();
        self.set_can_skip(turn && self.config.always_skippable);
        self.set_can_succumb(turn);
    }

    pub(crate) fn set_can_skip(&mut self, value: bool) {
        if self.can_skip != value {
            self.can_skip = value;
            self.events.push(SjuanEvent::SkippableChanged(value));
        }
    }

    pub(crate) fn set_can_succumb(&mut self, value: bool) {
        if self.can_succumb != value {
            self.can_succumb = value;
            self.events.push(SjuanEvent::SuccumbableChanged(value));
        }
    }

    /// Player `index` has emptied their hand.
    ///
    /// If it is still their phase, the phase ends first so that play
    /// continues with the next player.
    pub(crate) fn remove_player(&mut self, index: usize) {
        if self.phase.turn_index() == index && !self.phase.is_do_queue() {
            let n = self.players.len();
            let mut phase = Phase::PlayerTurn(index).next(n);
            while phase.is_do_queue() && self.queue.is_empty() {
                phase = phase.next(n);
            }
            self.phase = phase;
        }

        self.players.remove(index);
        let seat = self.seats.remove(index);
        self.finish_order.push(seat);
        info!(index, seat, remaining = self.players.len(), "player won");
        self.events.push(SjuanEvent::Won { index, seat });

        let phase = self.phase.without_player(index);
        let phase = match phase {
            // The last index wrapped past the removed player.
            Phase::PlayerTurn(i) if i >= self.players.len() => Phase::PlayerTurn(0),
            other => other,
        };
        self.enter_phase(phase);
    }

    // === Persistence ===

    /// Capture everything needed to resume the match.
    #[must_use]
    pub fn get_state(&self) -> SjuanSnapshot {
        SjuanSnapshot {
            config: self.config.clone(),
            players: self.players.iter().map(Hand::state).collect(),
            seats: self.seats.clone(),
            source_stack: self.source_stack.state(),
            ladder: self.ladder.state(),
            queue: self.queue.iter().cloned().collect(),
            phase: self.phase.clone(),
            can_skip: self.can_skip,
            can_succumb: self.can_succumb,
            finish_order: self.finish_order.clone(),
            rng: self.rng.state(),
        }
    }

    /// Replace the whole match with a snapshot.
    ///
    /// Pending events are discarded.
    pub fn set_state(&mut self, snapshot: SjuanSnapshot) -> Result<(), SnapshotError> {
        *self = Self::from_snapshot(snapshot)?;
        Ok(())
    }

    pub fn from_snapshot(snapshot: SjuanSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.players.len() != snapshot.seats.len() {
            return Err(SnapshotError::SeatMismatch {
                hands: snapshot.players.len(),
                seats: snapshot.seats.len(),
            });
        }
        let index = snapshot.phase.turn_index();
        if !snapshot.players.is_empty() && index >= snapshot.players.len() {
            return Err(SnapshotError::PhaseOutOfRange {
                index,
                player_count: snapshot.players.len(),
            });
        }

        let mut ladder = SuitLadder::new();
        ladder.set_state(snapshot.ladder);
        let duplicates = snapshot.config.deck_has_repeats();

        Ok(Self {
            config: snapshot.config,
            players: snapshot
                .players
                .into_iter()
                .map(|cards| seat_hand(Some(cards), duplicates))
                .collect(),
            seats: snapshot.seats,
            source_stack: CardStack::new(snapshot.source_stack),
            ladder,
            queue: snapshot.queue.into_iter().collect(),
            phase: snapshot.phase,
            can_skip: snapshot.can_skip,
            can_succumb: snapshot.can_succumb,
            finish_order: snapshot.finish_order,
            rng: GameRng::from_state(&snapshot.rng),
            events: Vec::new(),
        })
    }
}

/// A player's hand. Repeated cards are only accepted when the deck has them.
fn seat_hand(cards: Option<Vector<Card>>, duplicates: bool) -> Hand {
    let hand = cards.map_or_else(Hand::new, Hand::with_cards);
    if duplicates {
        hand.allow_duplicates()
    } else {
        hand
    }
}

/// The collections with their pending events, for speculative checks.
pub struct SavedCollections {
    players: Vec<Hand>,
    source_stack: CardStack,
    ladder: SuitLadder,
}

impl Snapshot for SjuanState {
    type Saved = SavedCollections;

    fn save(&self) -> SavedCollections {
        SavedCollections {
            players: self.players.clone(),
            source_stack: self.source_stack.clone(),
            ladder: self.ladder.clone(),
        }
    }

    fn restore(&mut self, saved: SavedCollections) {
        self.players = saved.players;
        self.source_stack = saved.source_stack;
        self.ladder = saved.ladder;
    }
}

/// Serializable picture of a whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SjuanSnapshot {
    pub config: SjuanConfig,
    pub players: Vec<Vector<Card>>,
    pub seats: Vec<usize>,
    pub source_stack: Vector<Card>,
    pub ladder: OrdMap<Suit, Vector<Card>>,
    pub queue: Vec<SjuanMove>,
    pub phase: Phase,
    pub can_skip: bool,
    pub can_succumb: bool,
    pub finish_order: Vec<usize>,
    pub rng: GameRngState,
}

impl SjuanSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rank;

    fn config(player_count: usize) -> SjuanConfig {
        SjuanConfig {
            player_count,
            seed: 42,
            ..SjuanConfig::default()
        }
    }

    #[test]
    fn test_new_queues_deal() {
        let state = SjuanState::new(config(3));

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.source_stack().len(), 52);
        assert_eq!(state.queue().len(), 52);
        assert!(state.phase().is_do_queue());
        assert!(!state.can_skip());
        assert!(!state.can_succumb());

        for (i, mv) in state.queue().iter().enumerate() {
            assert_eq!(
                mv,
                &Move::FromTo(
                    SjuanTake::SourceStack(StackTake::Top),
                    SjuanInsert::Player(i % 3, HandInsert(0))
                )
            );
        }
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = SjuanState::new(config(4));
        let b = SjuanState::new(config(4));
        assert_eq!(a.source_stack().cards(), b.source_stack().cards());
        assert_eq!(a.phase(), b.phase());
    }

    #[test]
    fn test_reset_reshuffles() {
        let mut state = SjuanState::new(config(2));
        let first = state.source_stack().state();
        state.reset();
        assert_eq!(state.queue().len(), 52);
        assert_ne!(state.source_stack().state(), first);
    }

    #[test]
    fn test_advance_sets_flags() {
        let mut state = SjuanState::new(config(3));
        state.queue = Vector::new();
        state.phase = Phase::PlayerTurn(1);

        state.advance_phase();
        assert_eq!(state.phase(), &Phase::PlayerTurn(2));
        assert!(state.can_skip());
        assert!(state.can_succumb());

        let events = state.drain_events();
        assert!(events.contains(&SjuanEvent::SkippableChanged(true)));
        assert!(events.contains(&SjuanEvent::SuccumbableChanged(true)));
        assert!(events.contains(&SjuanEvent::TurnChanged {
            phase: Phase::PlayerTurn(2)
        }));
    }

    #[test]
    fn test_flag_events_only_on_change() {
        let mut state = SjuanState::new(config(2));
        state.set_can_skip(false);
        state.set_can_succumb(false);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_enter_give_cards() {
        let mut state = SjuanState::new(config(3));
        state.queue = Vector::new();
        state.phase = Phase::PlayerTurn(0);
        state.refresh_flags();

        state.enter_give_cards(0);
        assert_eq!(state.phase(), &Phase::GiveCards(2, 3));
        assert!(!state.can_succumb());
        assert!(!state.can_skip());
    }

    #[test]
    fn test_remove_player_rewrites_phase() {
        let mut state = SjuanState::new(config(5));
        state.queue = Vector::new();
        state.phase = Phase::PlayerTurn(3);

        state.remove_player(1);
        assert_eq!(state.phase(), &Phase::PlayerTurn(2));
        assert_eq!(state.seats(), &[0, 2, 3, 4]);
        assert_eq!(state.finish_order(), &[1]);
        assert!(state
            .drain_events()
            .contains(&SjuanEvent::Won { index: 1, seat: 1 }));
    }

    #[test]
    fn test_remove_current_player_passes_turn() {
        let mut state = SjuanState::new(config(3));
        state.queue = Vector::new();

        state.phase = Phase::PlayerTurn(1);
        state.remove_player(1);
        assert_eq!(state.phase(), &Phase::PlayerTurn(1));
        assert_eq!(state.seats(), &[0, 2]);

        state.phase = Phase::PlayerTurn(1);
        state.remove_player(1);
        assert_eq!(state.phase(), &Phase::PlayerTurn(0));
        assert!(state.is_over());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = SjuanState::new(config(3));
        state.players[0] = Hand::with_cards([Card::new(Suit::Hearts, Rank::Nine)]);

        let snapshot = state.get_state();
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = SjuanSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, snapshot);

        let restored = SjuanState::from_snapshot(decoded).unwrap();
        assert_eq!(restored.get_state(), snapshot);
    }

    #[test]
    fn test_snapshot_rejects_bad_phase() {
        let mut snapshot = SjuanState::new(config(2)).get_state();
        snapshot.phase = Phase::PlayerTurn(5);
        assert!(matches!(
            SjuanState::from_snapshot(snapshot),
            Err(SnapshotError::PhaseOutOfRange { index: 5, player_count: 2 })
        ));
    }

    #[test]
    fn test_repeated_cards_are_dealt() {
        let seven = Card::new(Suit::Spades, Rank::Seven);
        let config = SjuanConfig {
            player_count: 1,
            deck: vec![seven, seven],
            shuffle: false,
            ..config(1)
        };
        assert!(config.deck_has_repeats());
        assert!(!SjuanConfig::default().deck_has_repeats());

        let mut state = SjuanState::new(config);
        assert!(state.players()[0].insert_is_valid(&HandInsert(0), &seven));
        state.players[0].do_insert(&HandInsert(0), seven);

        // Restored hands keep accepting the repeated card.
        let restored = SjuanState::from_snapshot(state.get_state()).unwrap();
        assert!(restored.players()[0].insert_is_valid(&HandInsert(0), &seven));
    }

    #[test]
    #[should_panic(expected = "Must give at least 1 card")]
    fn test_new_rejects_zero_cards_to_give() {
        let _ = SjuanState::new(SjuanConfig {
            cards_to_give: 0,
            ..config(3)
        });
    }

    #[test]
    #[should_panic(expected = "Player count must be 1-8")]
    fn test_new_rejects_too_many_players() {
        let _ = SjuanState::new(config(9));
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(matches!(
            SjuanSnapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Decode(_))
        ));
    }
}
