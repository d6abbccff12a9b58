//! Shared helpers for integration tests.

#![allow(dead_code)]

use rust_cards::games::sjuan::{SjuanGame, SjuanInsert, SjuanMove, SjuanTake};
use rust_cards::{HandInsert, HandTake, Move};
use tracing_subscriber::{fmt, EnvFilter};

/// Install a test subscriber. `TEST_LOG` or `RUST_LOG` pick the level;
/// the default is quiet.
pub fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

/// Move the acting player's card at `k` onto the ladder.
pub fn play(k: usize) -> SjuanMove {
    Move::FromTo(
        SjuanTake::Myself(HandTake(k)),
        SjuanInsert::Ladder(rust_cards::games::sjuan::LadderInsert::Place),
    )
}

/// Hand the acting player's card at `k` to player `to`.
pub fn give(k: usize, to: usize) -> SjuanMove {
    Move::FromTo(SjuanTake::Myself(HandTake(k)), SjuanInsert::Player(to, HandInsert(0)))
}

/// Cards held anywhere in the match.
pub fn total_cards(game: &SjuanGame) -> usize {
    let state = game.state();
    state.players().iter().map(|h| h.len()).sum::<usize>()
        + state.source_stack().len()
        + state.ladder().len()
}
