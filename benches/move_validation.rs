use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_cards::games::sjuan::{SjuanGame, SjuanGameBuilder, SjuanMove};

fn dealt_game(players: usize) -> SjuanGame {
    let mut game = SjuanGameBuilder::new().player_count(players).build(0xA5A5);
    game.finish_deal();
    game
}

fn bench_deal_validation(c: &mut Criterion) {
    let mut g = c.benchmark_group("sjuan_deal");
    for &players in &[2usize, 4, 8] {
        let mut game = SjuanGameBuilder::new().player_count(players).build(7);
        let queued: Vec<SjuanMove> = game.state().queue().iter().cloned().collect();
        g.bench_with_input(BenchmarkId::new("move_is_valid", players), &queued, |b, q| {
            b.iter(|| black_box(game.is_valid(black_box(q))))
        });
    }
    g.finish();
}

fn bench_candidate_moves(c: &mut Criterion) {
    let mut g = c.benchmark_group("sjuan_turn");
    for &players in &[2usize, 4, 8] {
        let mut game = dealt_game(players);
        let turn = game.state().turn_index().unwrap_or(0);
        let hand = game.state().players()[turn].len();

        g.bench_with_input(BenchmarkId::new("moves_for_card", players), &hand, |b, &n| {
            b.iter(|| {
                for k in 0..n {
                    black_box(game.moves_for_card(black_box(k)));
                }
            })
        });

        let candidates: Vec<SjuanMove> = (0..hand)
            .flat_map(|k| game.moves_for_card(k))
            .map(|m| m.mv)
            .collect();
        g.bench_with_input(BenchmarkId::new("move_info", players), &candidates, |b, moves| {
            b.iter(|| {
                for mv in moves {
                    black_box(game.move_info(std::slice::from_ref(mv)));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_deal_validation, bench_candidate_moves);
criterion_main!(benches);
