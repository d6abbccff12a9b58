//! Core engine types: cards, RNG, errors.
//!
//! Everything here is game-agnostic. Games build their collections and
//! rules on top of these values.

pub mod card;
pub mod error;
pub mod rng;

pub use card::{standard_deck, Card, Colour, Rank, Suit};
pub use error::SnapshotError;
pub use rng::{GameRng, GameRngState};
