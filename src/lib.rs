//! # rust-cards
//!
//! A move/rules engine for turn-based card games, with a complete rule set
//! for the shedding game Sjuan.
//!
//! ## Design Principles
//!
//! 1. **Moves Are Data**: a `Move` is either a self-contained action or a
//!    take-then-insert transfer between two named participants. Moves are
//!    serializable and say nothing about which collection they touch.
//!
//! 2. **Game-Specific Routing**: each game's `RulesEngine` resolves move
//!    participants to concrete collections. The generic engine never knows
//!    how many players or piles a game has.
//!
//! 3. **Validation Never Mutates**: transfers are checked by lifting cards
//!    out of their source and restoring every collection from a snapshot.
//!    An illegal batch leaves the state exactly as it was.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: collection contents live in `im-rs`
//!   vectors, so snapshots are O(1) clones.
//!
//! - **Pull-Style Events**: collections and game states queue events that
//!   callers drain after each batch. Nothing calls back into user code while
//!   state is being mutated.
//!
//! ## Modules
//!
//! - `core`: Cards, deterministic RNG, errors
//! - `collections`: `CardCollection` trait, hands, stacks, routed sites
//! - `rules`: Move algebra and the `RulesEngine` trait
//! - `games`: Concrete games (`sjuan`)

pub mod collections;
pub mod core;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    standard_deck, Card, Colour, GameRng, GameRngState, Rank, SnapshotError, Suit,
};

pub use crate::collections::{
    CardCollection, CardStack, CollectionEvent, Hand, HandInsert, HandTake, StackAction,
    StackInsert, StackTake,
};

pub use crate::rules::{Move, MoveBatch, RulesEngine, Snapshot};

pub use crate::games::sjuan::{
    Phase, SjuanAction, SjuanConfig, SjuanEvent, SjuanGame, SjuanGameBuilder, SjuanInsert,
    SjuanMove, SjuanRules, SjuanSnapshot, SjuanState, SjuanTake, SuitLadder,
};
