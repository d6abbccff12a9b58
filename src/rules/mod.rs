//! Move algebra and the generic rules engine.
//!
//! Games implement `RulesEngine` to define:
//! - How abstract move participants resolve to collections
//! - Which batches are legal in the current game phase
//!
//! The engine owns the validate-then-apply pipeline and never interprets
//! game-specific concepts directly.

pub mod engine;
pub mod moves;

pub use engine::{ActionRoute, GameMove, RulesEngine, Snapshot};
pub use moves::{Move, MoveBatch};
