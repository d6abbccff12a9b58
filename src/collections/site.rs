//! Type-erased bindings of a collection to one collection-local move.
//!
//! A rules engine routes an abstract move participant ("the source stack",
//! "player 2's hand at slot 0") to a concrete collection plus the move that
//! collection understands. Collections have different move types, so the
//! binding is erased behind three small object-safe traits that the generic
//! engine works with.

use super::collection::{CardCollection, TakenCards};
use crate::core::{Card, GameRng};

/// A collection bound to one of its actions.
pub trait ActionSite {
    fn is_valid(&self) -> bool;
    fn commit(&mut self);
}

/// A collection bound to one of its inserts.
pub trait InsertSite {
    fn is_valid(&self, card: &Card) -> bool;
    fn commit(&mut self, card: Card);
}

/// A collection bound to one of its takes.
pub trait TakeSite {
    fn is_valid(&self) -> bool;

    /// Remove the cards without recording an event. Used while checking
    /// legality; the caller restores the collection afterwards.
    fn lift(&mut self) -> TakenCards;

    fn commit(&mut self) -> TakenCards;
}

/// Bind a collection to an action. Actions may need randomness, so the
/// binding also borrows the game's RNG.
pub fn bind_action<'a, C: CardCollection>(
    collection: &'a mut C,
    action: C::Action,
    rng: &'a mut GameRng,
) -> Box<dyn ActionSite + 'a> {
    Box::new(ActionBinding {
        collection,
        action,
        rng,
    })
}

/// Bind a collection to an insert.
pub fn bind_insert<C: CardCollection>(
    collection: &mut C,
    insert: C::Insert,
) -> Box<dyn InsertSite + '_> {
    Box::new(InsertBinding { collection, insert })
}

/// Bind a collection to a take.
pub fn bind_take<C: CardCollection>(collection: &mut C, take: C::Take) -> Box<dyn TakeSite + '_> {
    Box::new(TakeBinding { collection, take })
}

struct ActionBinding<'a, C: CardCollection> {
    collection: &'a mut C,
    action: C::Action,
    rng: &'a mut GameRng,
}

struct InsertBinding<'a, C: CardCollection> {
    collection: &'a mut C,
    insert: C::Insert,
}

struct TakeBinding<'a, C: CardCollection> {
    collection: &'a mut C,
    take: C::Take,
}

impl<C: CardCollection> ActionSite for ActionBinding<'_, C> {
    fn is_valid(&self) -> bool {
        self.collection.action_is_valid(&self.action)
    }

    fn commit(&mut self) {
        self.collection.do_action(&self.action, self.rng);
    }
}

impl<C: CardCollection> InsertSite for InsertBinding<'_, C> {
    fn is_valid(&self, card: &Card) -> bool {
        self.collection.insert_is_valid(&self.insert, card)
    }

    fn commit(&mut self, card: Card) {
        self.collection.do_insert(&self.insert, card);
    }
}

impl<C: CardCollection> TakeSite for TakeBinding<'_, C> {
    fn is_valid(&self) -> bool {
        self.collection.take_is_valid(&self.take)
    }

    fn lift(&mut self) -> TakenCards {
        self.collection.apply_take(&self.take)
    }

    fn commit(&mut self) -> TakenCards {
        self.collection.do_take(&self.take)
    }
}
