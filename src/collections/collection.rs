//! The `CardCollection` capability.
//!
//! A collection owns some cards and exposes three disjoint kinds of move:
//!
//! - **Action**: rearranges the collection without changing membership
//!   (e.g. shuffling a stack).
//! - **Insert**: adds one externally supplied card at a position given by
//!   the move.
//! - **Take**: removes and returns cards from a position given by the move.
//!
//! Each kind has a validity predicate and a committing mutator. Validity is
//! a property of the *current* state: a take that is legal now may not be
//! legal after another move has been applied.
//!
//! ## Snapshots
//!
//! `state()` returns the collection's contents as a plain value and
//! `set_state()` restores it wholesale. All provided collections store their
//! cards in `im::Vector`, so a snapshot is an O(1) clone. `speculative_take`
//! is built on this pair.
//!
//! ## Events
//!
//! Committed operations (`do_action`, `do_insert`, `do_take`) record a
//! `CollectionEvent` that callers drain with `drain_events()`. The raw
//! `apply_*` methods record nothing; they are what speculative checks use.

use smallvec::SmallVec;

use crate::core::{Card, GameRng};

/// Cards removed by a take. Almost always exactly one.
pub type TakenCards = SmallVec<[Card; 1]>;

/// A committed change to a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionEvent<A, I, T> {
    Action(A),
    Insert(I, Card),
    Take(T),
}

/// Event type of a particular collection.
pub type EventOf<C> = CollectionEvent<
    <C as CardCollection>::Action,
    <C as CardCollection>::Insert,
    <C as CardCollection>::Take,
>;

/// A container of cards with validated mutation.
///
/// Implementors provide the predicates and the raw `apply_*` mutators; the
/// committing `do_*` methods, event recording and speculative take come for
/// free.
pub trait CardCollection {
    /// Membership-preserving moves.
    type Action: Clone + std::fmt::Debug;
    /// Where an incoming card goes.
    type Insert: Clone + std::fmt::Debug;
    /// Which cards leave.
    type Take: Clone + std::fmt::Debug;
    /// Snapshot of the held cards.
    type State: Clone + PartialEq + std::fmt::Debug;

    fn action_is_valid(&self, action: &Self::Action) -> bool;

    /// Perform a valid action. Callers must have checked `action_is_valid`.
    fn apply_action(&mut self, action: &Self::Action, rng: &mut GameRng);

    fn insert_is_valid(&self, insert: &Self::Insert, card: &Card) -> bool;

    /// Insert a card at a valid position. Callers must have checked
    /// `insert_is_valid`.
    fn apply_insert(&mut self, insert: &Self::Insert, card: Card);

    fn take_is_valid(&self, take: &Self::Take) -> bool;

    /// Remove cards for a valid take. Callers must have checked
    /// `take_is_valid`.
    fn apply_take(&mut self, take: &Self::Take) -> TakenCards;

    fn state(&self) -> Self::State;

    fn set_state(&mut self, state: Self::State);

    /// Pending events, oldest first.
    fn events_mut(&mut self) -> &mut Vec<EventOf<Self>>;

    // === Provided ===

    /// Validate and perform an action, recording an event.
    ///
    /// Panics if the action is invalid.
    fn do_action(&mut self, action: &Self::Action, rng: &mut GameRng) {
        assert!(
            self.action_is_valid(action),
            "invalid action {:?} committed without a validity check",
            action
        );
        self.apply_action(action, rng);
        self.events_mut().push(CollectionEvent::Action(action.clone()));
    }

    /// Validate and insert a card, recording an event.
    ///
    /// Panics if the insert is invalid.
    fn do_insert(&mut self, insert: &Self::Insert, card: Card) {
        assert!(
            self.insert_is_valid(insert, &card),
            "invalid insert {:?} of {} committed without a validity check",
            insert,
            card
        );
        self.apply_insert(insert, card);
        self.events_mut().push(CollectionEvent::Insert(insert.clone(), card));
    }

    /// Take cards if the take is valid, recording an event.
    ///
    /// An invalid take is a no-op that returns no cards.
    fn do_take(&mut self, take: &Self::Take) -> TakenCards {
        if !self.take_is_valid(take) {
            return TakenCards::new();
        }
        let cards = self.apply_take(take);
        self.events_mut().push(CollectionEvent::Take(take.clone()));
        cards
    }

    /// The cards a take *would* remove, leaving the collection unchanged.
    ///
    /// Returns `None` if the take is invalid.
    fn speculative_take(&mut self, take: &Self::Take) -> Option<TakenCards> {
        if !self.take_is_valid(take) {
            return None;
        }
        let snapshot = self.state();
        let cards = self.apply_take(take);
        self.set_state(snapshot);
        Some(cards)
    }

    /// Remove and return all pending events.
    fn drain_events(&mut self) -> Vec<EventOf<Self>> {
        std::mem::take(self.events_mut())
    }
}

/// Action type for collections that have no actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NoMove {}
