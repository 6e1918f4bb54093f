use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use unichess::board_state::board::Board;
use unichess::board_state::chess_types::Color;
use unichess::search::board_scoring::SquaredMaterialScorer;
use unichess::search::negamax::{search, SearchConfig};
use unichess::search::strategy::{choose_move, StrategyConfig};

const MIDDLEGAME_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_negamax(c: &mut Criterion) {
    let mut group = c.benchmark_group("negamax");
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(10);

    let board = Board::from_fen(MIDDLEGAME_FEN).expect("benchmark FEN should parse");

    // Correctness guard before benchmarking.
    let guard = search(&board, Color::White, &SquaredMaterialScorer, &SearchConfig::default());
    assert!(guard.best_move.is_some());

    for depth in [2u8, 3] {
        let config = SearchConfig {
            depth,
            ..SearchConfig::default()
        };
        group.bench_function(format!("middlegame_d{depth}"), |b| {
            b.iter(|| {
                let root = board.clone();
                let result =
                    search(&root, Color::White, &SquaredMaterialScorer, black_box(&config));
                black_box(result.best_move)
            });
        });
    }

    group.finish();
}

fn bench_strategy(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy");
    group.sample_size(10);

    let board = Board::from_fen(MIDDLEGAME_FEN).expect("benchmark FEN should parse");
    for parallel in [false, true] {
        let config = StrategyConfig {
            depth: 1,
            parallel,
            seed: Some(1),
            ..StrategyConfig::default()
        };
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(format!("middlegame_d1_{label}"), |b| {
            b.iter(|| {
                let root = board.clone();
                black_box(choose_move(&root, Color::White, black_box(&config)))
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_negamax, bench_strategy);
criterion_main!(search_benches);
