use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use jieqi_engine::game_state::game_state::GameState;
use jieqi_engine::game_state::jieqi_rules::STARTING_POSITION;
use jieqi_engine::move_generation::legal_move_generator::JieqiMoveGenerator;
use jieqi_engine::move_generation::move_generator::MoveGenerator;
use jieqi_engine::move_generation::perft::{perft, perft_multi_threaded};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    board: &'static str,
    red_to_move: bool,
    max_depth: u8,
}

// Rooks traded off, both cannons advanced.
const MIDDLEGAME: &str = concat!(
    ".EFGKGFE.",
    ".........",
    "....H..H.",
    "I.I.I.I.I",
    ".........",
    ".........",
    "i.i.i.i.i",
    ".h....h..",
    ".........",
    ".efgkgfe.",
);

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "opening_red",
        board: STARTING_POSITION,
        red_to_move: true,
        max_depth: 3,
    },
    BenchCase {
        name: "opening_black",
        board: STARTING_POSITION,
        red_to_move: false,
        max_depth: 3,
    },
    BenchCase {
        name: "middlegame",
        board: MIDDLEGAME,
        red_to_move: true,
        max_depth: 3,
    },
];

fn bench_perft(c: &mut Criterion) {
    let max_depth = std::env::var("JIEQI_PERFT_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(3);

    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let generator = JieqiMoveGenerator;
    for case in CASES {
        let mut game = GameState::from_external(case.board.as_bytes(), case.red_to_move, 0)
            .expect("benchmark board should parse");
        game.generate_random_map(&mut StdRng::seed_from_u64(0x5eed));

        if case.board == STARTING_POSITION {
            // Correctness guard before benchmarking.
            let first = perft(&generator, &game, 1).expect("perft should run");
            assert_eq!(first.nodes, 44, "opening move count for {}", case.name);
        }

        for depth in 1..=case.max_depth.min(max_depth) {
            let nodes = perft(&generator, &game, depth).expect("perft should run").nodes;
            group.throughput(Throughput::Elements(nodes as u64));
            group.bench_with_input(
                BenchmarkId::new(case.name, format!("d{depth}")),
                &game,
                |b, game| {
                    b.iter(|| {
                        let count = perft(black_box(&generator), black_box(game), black_box(depth))
                            .expect("perft benchmark run should succeed");
                        assert_eq!(count.nodes, nodes);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_perft_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_threaded");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    let mut game = GameState::new_game();
    game.generate_random_map(&mut StdRng::seed_from_u64(0x5eed));
    let generator: Arc<dyn MoveGenerator> = Arc::new(JieqiMoveGenerator);
    let depth = 3;
    let expected = perft(&JieqiMoveGenerator, &game, depth)
        .expect("perft should run")
        .nodes;

    group.throughput(Throughput::Elements(expected as u64));
    group.bench_function(BenchmarkId::new("opening", format!("d{depth}")), |b| {
        b.iter(|| {
            let count = perft_multi_threaded(Arc::clone(&generator), black_box(&game), depth)
                .expect("threaded perft should run");
            assert_eq!(count.nodes, expected);
            black_box(count.nodes)
        });
    });

    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_perft_threaded);
criterion_main!(perft_benches);
