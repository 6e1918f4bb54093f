use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use unichess::board_state::board::Board;
use unichess::move_generation::perft::{perft, perft_multi_threaded};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let board = Board::from_fen(case.fen).expect("benchmark FEN should parse");
        let color = board.side_to_move();

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&board, color, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            group.bench_with_input(
                BenchmarkId::new(case.name, format!("d{depth}")),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        // A fresh root each time so memoized move lists are rebuilt.
                        let root = black_box(&board).clone();
                        let count = perft(&root, color, black_box(depth));
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_perft_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_threads");
    group.sample_size(10);

    let board = Board::new();
    group.bench_function("startpos_d3", |b| {
        b.iter(|| {
            let root = board.clone();
            let count = perft_multi_threaded(&root, root.side_to_move(), black_box(3))
                .expect("perft workers should not panic");
            assert_eq!(count.nodes, 8902);
            black_box(count.nodes)
        });
    });

    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_perft_threads);
criterion_main!(perft_benches);
