//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define how move participants route to
//! collections (`reference_*`). Games with turn structure override
//! `move_is_valid` and `do_moves`.
//!
//! The provided methods implement the generic pipeline:
//! - `move_is_valid`: every move in a batch is checked against the state as
//!   it was *before* the batch; nothing is applied between checks
//! - `apply_move`: commit one move
//! - `do_moves`: check the whole batch, then apply all of it or nothing
//!
//! ## Speculative Transfers
//!
//! A `FromTo` move is checked by lifting the cards out of the source
//! without committing, checking the destination with the cards lifted, and
//! then restoring every collection from a snapshot. Validation therefore
//! never leaves a collection mutated, whether the move is legal or not.

use std::fmt::Debug;

use tracing::{debug, trace};

use super::moves::Move;
use crate::collections::{ActionSite, InsertSite, TakeSite};

/// Where an action is routed.
pub enum ActionRoute<'s> {
    /// The action touches no collection; the rules handle it alone.
    SelfContained,
    /// The action is performed by a collection.
    Site(Box<dyn ActionSite + 's>),
}

/// Whole-state snapshots for speculative checks.
///
/// `restore(save())` must return the state to exactly what it was.
pub trait Snapshot {
    type Saved;

    fn save(&self) -> Self::Saved;

    fn restore(&mut self, saved: Self::Saved);
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `reference_take`/`reference_insert` return `None` for participants
///   that do not exist in the current state (e.g. a player index out of
///   range); the move is then illegal
/// - Moves within one batch must not depend on each other's effects:
///   legality is established against the pre-batch state only
pub trait RulesEngine {
    type State: Snapshot;
    type Action: Clone + PartialEq + Debug;
    type Take: Clone + PartialEq + Debug;
    type Insert: Clone + PartialEq + Debug;

    fn reference_action<'s>(&self, action: &Self::Action, state: &'s mut Self::State)
        -> ActionRoute<'s>;

    fn reference_take<'s>(
        &self,
        take: &Self::Take,
        state: &'s mut Self::State,
    ) -> Option<Box<dyn TakeSite + 's>>;

    fn reference_insert<'s>(
        &self,
        insert: &Self::Insert,
        state: &'s mut Self::State,
    ) -> Option<Box<dyn InsertSite + 's>>;

    // === Provided ===

    /// Check one move against the current state, leaving it unchanged.
    fn single_move_is_valid(&self, mv: &GameMove<Self>, state: &mut Self::State) -> bool {
        match mv {
            Move::Action(action) => match self.reference_action(action, state) {
                ActionRoute::SelfContained => true,
                ActionRoute::Site(site) => site.is_valid(),
            },
            Move::FromTo(take, insert) => {
                let saved = state.save();
                let valid = self.transfer_is_valid(take, insert, state);
                state.restore(saved);
                valid
            }
        }
    }

    /// Check a transfer, leaving the lifted cards out of the source.
    ///
    /// Callers must restore the state afterwards.
    fn transfer_is_valid(
        &self,
        take: &Self::Take,
        insert: &Self::Insert,
        state: &mut Self::State,
    ) -> bool {
        let cards = match self.reference_take(take, state) {
            Some(mut site) if site.is_valid() => site.lift(),
            _ => return false,
        };
        match self.reference_insert(insert, state) {
            Some(site) => cards.iter().all(|card| site.is_valid(card)),
            None => false,
        }
    }

    /// A batch is valid iff every move is valid against the pre-batch state.
    fn move_is_valid(&self, moves: &[GameMove<Self>], state: &mut Self::State) -> bool {
        moves.iter().all(|mv| self.single_move_is_valid(mv, state))
    }

    /// Commit one move. The move must have been validated.
    fn apply_move(&self, mv: &GameMove<Self>, state: &mut Self::State) {
        match mv {
            Move::Action(action) => {
                if let ActionRoute::Site(mut site) = self.reference_action(action, state) {
                    site.commit();
                }
            }
            Move::FromTo(take, insert) => {
                let cards = self
                    .reference_take(take, state)
                    .expect("validated take must route to a collection")
                    .commit();
                for card in cards {
                    self.reference_insert(insert, state)
                        .expect("validated insert must route to a collection")
                        .commit(card);
                }
            }
        }
        trace!(?mv, "applied move");
    }

    /// Apply a batch atomically.
    ///
    /// Returns `false`, leaving the state untouched, if any move is illegal.
    fn do_moves(&self, moves: &[GameMove<Self>], state: &mut Self::State) -> bool {
        if !self.move_is_valid(moves, state) {
            debug!(count = moves.len(), "rejected illegal batch");
            return false;
        }
        for mv in moves {
            self.apply_move(mv, state);
        }
        true
    }
}

/// The move type of a rules engine.
pub type GameMove<R> = Move<
    <R as RulesEngine>::Action,
    <R as RulesEngine>::Take,
    <R as RulesEngine>::Insert,
>;
