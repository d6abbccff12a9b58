//! Error types for the persistence boundary.
//!
//! Illegal moves are not errors: validation returns `false` and the state is
//! left untouched. Bypassing a validity check is a programming error and
//! panics. Only restoring external data can fail recoverably.

use thiserror::Error;

/// Failure to encode, decode or restore a game snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),

    #[error("snapshot phase refers to player {index} but only {player_count} remain")]
    PhaseOutOfRange { index: usize, player_count: usize },

    #[error("snapshot has {hands} hands but {seats} seats")]
    SeatMismatch { hands: usize, seats: usize },
}
