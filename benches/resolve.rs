use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_merge::{Board, Direction, GameRng, MoveResolver};

fn bench_settle(c: &mut Criterion) {
    let rows = [[2, 2, 4, 4], [0, 8, 0, 8], [2, 0, 2, 2], [4, 4, 4, 0]];
    let resolver = MoveResolver::new();

    for direction in Direction::ALL {
        c.bench_function(&format!("settle_{direction}"), |b| {
            b.iter(|| {
                let mut board = Board::from_rows(rows);
                resolver.settle(&mut board, black_box(direction))
            })
        });
    }
}

fn bench_random_game(c: &mut Criterion) {
    c.bench_function("play_100_moves", |b| {
        b.iter(|| {
            let mut rng = GameRng::new(42);
            let mut board = tile_merge::new_game(&mut rng);
            let resolver = MoveResolver::new();
            for i in 0..100 {
                if resolver
                    .resolve(&mut board, Direction::ALL[i % 4], &mut rng)
                    .is_lost()
                {
                    break;
                }
            }
            board
        })
    });
}

criterion_group!(benches, bench_settle, bench_random_game);
criterion_main!(benches);
