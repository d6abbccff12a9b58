//! The Sjuan turn structure.
//!
//! ```text
//! DoQueue(inner)  --queue drained-->  inner
//! PlayerTurn(i)   --turn ends------>  DoQueue(PlayerTurn(i + 1))
//! GiveCards(i, n) --card given----->  GiveCards(i, n - 1)          if n > 1
//!                                     DoQueue(PlayerTurn(i + 1))   otherwise
//! ```
//!
//! `DoQueue` lets pending queued moves (the deal) apply before the wrapped
//! phase starts. Every phase carries a turn index, found by unwrapping any
//! `DoQueue` layers.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Apply queued moves, then continue with the wrapped phase.
    DoQueue(Box<Phase>),
    /// An ordinary turn of player `i`.
    PlayerTurn(usize),
    /// Player `i` still owes `n` cards to the player after them, who asked.
    GiveCards(usize, usize),
}

impl Phase {
    /// The phase a match starts in: deal, then `first` plays.
    #[must_use]
    pub fn start(first: usize) -> Self {
        Phase::DoQueue(Box::new(Phase::PlayerTurn(first)))
    }

    /// The phase after the current one ends.
    #[must_use]
    pub fn next(&self, num_players: usize) -> Phase {
        let n = num_players.max(1);
        match self {
            Phase::DoQueue(inner) => (**inner).clone(),
            Phase::PlayerTurn(i) => Phase::DoQueue(Box::new(Phase::PlayerTurn((i + 1) % n))),
            Phase::GiveCards(i, remaining) if *remaining > 1 => Phase::GiveCards(*i, remaining - 1),
            Phase::GiveCards(i, _) => Phase::PlayerTurn(*i).next(num_players),
        }
    }

    /// The index of the player who acts in this phase.
    #[must_use]
    pub fn turn_index(&self) -> usize {
        match self {
            Phase::DoQueue(inner) => inner.turn_index(),
            Phase::PlayerTurn(i) | Phase::GiveCards(i, _) => *i,
        }
    }

    /// Rewrite player indices after player `removed` has left the match.
    ///
    /// Indices above `removed` shift down by one; the rest are untouched.
    #[must_use]
    pub fn without_player(&self, removed: usize) -> Phase {
        let shift = |i: usize| if i > removed { i - 1 } else { i };
        match self {
            Phase::DoQueue(inner) => Phase::DoQueue(Box::new(inner.without_player(removed))),
            Phase::PlayerTurn(i) => Phase::PlayerTurn(shift(*i)),
            Phase::GiveCards(i, n) => Phase::GiveCards(shift(*i), *n),
        }
    }

    #[must_use]
    pub fn is_do_queue(&self) -> bool {
        matches!(self, Phase::DoQueue(_))
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        matches!(self, Phase::PlayerTurn(_))
    }

    #[must_use]
    pub fn is_give_cards(&self) -> bool {
        matches!(self, Phase::GiveCards(..))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::DoQueue(inner) => write!(f, "queue, then {}", inner),
            Phase::PlayerTurn(i) => write!(f, "turn of player #{}", i),
            Phase::GiveCards(i, n) => write!(f, "player #{} gives {} more", i, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued(phase: Phase) -> Phase {
        Phase::DoQueue(Box::new(phase))
    }

    #[test]
    fn test_player_turn_next() {
        for n in 1..6 {
            for i in 0..n {
                assert_eq!(Phase::PlayerTurn(i).next(n), queued(Phase::PlayerTurn((i + 1) % n)));
            }
        }
    }

    #[test]
    fn test_give_cards_counts_down() {
        assert_eq!(Phase::GiveCards(1, 3).next(4), Phase::GiveCards(1, 2));
        assert_eq!(Phase::GiveCards(1, 2).next(4), Phase::GiveCards(1, 1));
        assert_eq!(Phase::GiveCards(1, 1).next(4), queued(Phase::PlayerTurn(2)));
        assert_eq!(Phase::GiveCards(3, 1).next(4), queued(Phase::PlayerTurn(0)));
    }

    #[test]
    fn test_do_queue_unwraps() {
        assert_eq!(Phase::start(2).next(3), Phase::PlayerTurn(2));
        assert_eq!(queued(Phase::GiveCards(0, 2)).next(3), Phase::GiveCards(0, 2));
    }

    #[test]
    fn test_turn_index() {
        assert_eq!(Phase::PlayerTurn(3).turn_index(), 3);
        assert_eq!(Phase::GiveCards(2, 1).turn_index(), 2);
        assert_eq!(queued(queued(Phase::PlayerTurn(4))).turn_index(), 4);
    }

    #[test]
    fn test_without_player() {
        assert_eq!(Phase::PlayerTurn(3).without_player(1), Phase::PlayerTurn(2));
        assert_eq!(Phase::PlayerTurn(3).without_player(4), Phase::PlayerTurn(3));
        assert_eq!(Phase::PlayerTurn(3).without_player(3), Phase::PlayerTurn(3));
        assert_eq!(Phase::GiveCards(3, 2).without_player(0), Phase::GiveCards(2, 2));
        assert_eq!(Phase::GiveCards(0, 2).without_player(2), Phase::GiveCards(0, 2));
        assert_eq!(
            queued(queued(Phase::PlayerTurn(3))).without_player(1),
            queued(queued(Phase::PlayerTurn(2)))
        );
        assert_eq!(queued(Phase::GiveCards(1, 1)).without_player(2), queued(Phase::GiveCards(1, 1)));
    }

    #[test]
    fn test_serialization() {
        let phase = queued(Phase::GiveCards(1, 3));
        let json = serde_json::to_string(&phase).unwrap();
        let deserialized: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, deserialized);
    }
}
