//! Card collections: validated containers of cards.
//!
//! Collections are **game-agnostic**. A game composes them (one hand per
//! player, a source stack, its own shared piles) and routes moves to them
//! through its rules engine.
//!
//! ## Key Types
//!
//! - `CardCollection`: the action/insert/take capability with snapshots
//! - `Hand`: ordered cards with size bounds
//! - `CardStack`: take-from-top, insert-at-bottom stack
//! - `ActionSite`/`InsertSite`/`TakeSite`: a collection bound to one move

pub mod collection;
pub mod hand;
pub mod site;
pub mod stack;

pub use collection::{CardCollection, CollectionEvent, EventOf, NoMove, TakenCards};
pub use hand::{Hand, HandInsert, HandTake};
pub use site::{bind_action, bind_insert, bind_take, ActionSite, InsertSite, TakeSite};
pub use stack::{CardStack, StackAction, StackInsert, StackTake};
