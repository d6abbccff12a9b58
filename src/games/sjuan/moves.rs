//! Sjuan move participants.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ladder::LadderInsert;
use crate::collections::{HandInsert, HandTake, StackTake};
use crate::rules::Move;

/// Self-contained Sjuan actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SjuanAction {
    /// End the turn without playing.
    Skip,
    /// Succumb: the previous player must hand over cards.
    AskForCards,
}

/// Where a transferred card goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SjuanInsert {
    /// Onto the shared ladder.
    Ladder(LadderInsert),
    /// Into a player's hand.
    Player(usize, HandInsert),
}

/// Where a transferred card comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SjuanTake {
    /// The shared source stack (only the deal uses this).
    SourceStack(StackTake),
    /// The hand of the player whose turn it is.
    Myself(HandTake),
}

pub type SjuanMove = Move<SjuanAction, SjuanTake, SjuanInsert>;

impl fmt::Display for SjuanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SjuanAction::Skip => f.write_str("skip"),
            SjuanAction::AskForCards => f.write_str("ask for cards"),
        }
    }
}

impl fmt::Display for SjuanInsert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SjuanInsert::Ladder(m) => write!(f, "ladder [{}]", m),
            SjuanInsert::Player(n, HandInsert(i)) => write!(f, "player #{} [{}]", n, i),
        }
    }
}

impl fmt::Display for SjuanTake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SjuanTake::SourceStack(StackTake::Top) => f.write_str("source stack [top]"),
            SjuanTake::Myself(HandTake(i)) => write!(f, "themselves [{}]", i),
        }
    }
}
