//! Sjuan ("sevens"): a shedding game built outwards from the sevens.
//!
//! - The whole deck is dealt round-robin from a shuffled source stack
//! - On their turn a player either places one card on the `SuitLadder`,
//!   skips, or succumbs (asks for cards)
//! - A succumbing player receives `cards_to_give` cards, one at a time,
//!   from the player before them
//! - Aces and Kings grant an extra move
//! - Players who empty their hand leave the table; the last one left loses
//!
//! ```
//! use rust_cards::games::sjuan::SjuanGameBuilder;
//!
//! let mut game = SjuanGameBuilder::new().player_count(3).build(42);
//! assert!(game.finish_deal());
//! assert!(game.state().phase().is_player_turn());
//! ```

mod config;
mod game;
mod ladder;
mod moves;
mod phase;
mod rules;
mod state;

pub use config::SjuanConfig;
pub use game::{SjuanGame, SjuanGameBuilder};
pub use ladder::{LadderInsert, SuitLadder};
pub use moves::{SjuanAction, SjuanInsert, SjuanMove, SjuanTake};
pub use phase::Phase;
pub use rules::{CandidateMove, DeferredEffect, MoveInfo, SjuanRules};
pub use state::{CollectionEvents, SavedCollections, SjuanEvent, SjuanSnapshot, SjuanState};
