//! Move representation: a stand-alone action or a take-then-insert transfer.
//!
//! Moves are plain data. They name *participants* ("take from the source
//! stack", "insert into player 1's hand at slot 0"), never collections; the
//! game's rules engine resolves participants to collections when the move
//! is checked or applied. That keeps moves serializable and lets the same
//! move be compared against a queue of pending moves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// One atomic change of intent.
///
/// ## Example
///
/// ```
/// use rust_cards::rules::Move;
///
/// // A game whose actions are strings and whose participants are indices.
/// let pass: Move<&str, usize, usize> = Move::Action("pass");
/// let transfer: Move<&str, usize, usize> = Move::FromTo(0, 1);
///
/// assert!(pass.is_action());
/// assert_eq!(transfer.take(), Some(&0));
/// assert_eq!(transfer.insert(), Some(&1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move<A, T, I> {
    /// A self-contained action.
    Action(A),
    /// Take cards from one participant and insert each into another.
    FromTo(T, I),
}

/// A batch of moves submitted together. Most batches hold one move.
pub type MoveBatch<A, T, I> = SmallVec<[Move<A, T, I>; 1]>;

impl<A, T, I> Move<A, T, I> {
    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(self, Move::Action(_))
    }

    /// The take participant of a transfer.
    #[must_use]
    pub fn take(&self) -> Option<&T> {
        match self {
            Move::FromTo(take, _) => Some(take),
            Move::Action(_) => None,
        }
    }

    /// The insert participant of a transfer.
    #[must_use]
    pub fn insert(&self) -> Option<&I> {
        match self {
            Move::FromTo(_, insert) => Some(insert),
            Move::Action(_) => None,
        }
    }
}

impl<A: fmt::Display, T: fmt::Display, I: fmt::Display> fmt::Display for Move<A, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Action(action) => write!(f, "action {}", action),
            Move::FromTo(take, insert) => write!(f, "from {} to {}", take, insert),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestMove = Move<u8, u8, u8>;

    #[test]
    fn test_accessors() {
        let action = TestMove::Action(3);
        assert!(action.is_action());
        assert_eq!(action.take(), None);
        assert_eq!(action.insert(), None);

        let transfer = TestMove::FromTo(1, 2);
        assert!(!transfer.is_action());
        assert_eq!(transfer.take(), Some(&1));
        assert_eq!(transfer.insert(), Some(&2));
    }

    #[test]
    fn test_display() {
        assert_eq!(TestMove::Action(3).to_string(), "action 3");
        assert_eq!(TestMove::FromTo(1, 2).to_string(), "from 1 to 2");
    }

    #[test]
    fn test_serialization() {
        let transfer = TestMove::FromTo(1, 2);
        let json = serde_json::to_string(&transfer).unwrap();
        let deserialized: TestMove = serde_json::from_str(&json).unwrap();
        assert_eq!(transfer, deserialized);
    }
}
