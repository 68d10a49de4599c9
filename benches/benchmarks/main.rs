use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use itertools::Itertools as _;
use rand::{SeedableRng, rngs::StdRng};
use twenty_fourty_eight_console::board::{Board, Direction, test_utils};

/// Generate boards across every fill level for benchmarking.
fn generate_boards(count: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(0x2048);

    (0..=16)
        .flat_map(|filled| {
            (0..count)
                .map(|_| test_utils::random_board(4, 4, filled, &mut rng))
                .collect_vec()
        })
        .collect()
}

fn bench_push(c: &mut Criterion) {
    const COUNT: usize = 100;

    let boards = generate_boards(COUNT);

    let mut group = c.benchmark_group("push");
    group.throughput(Throughput::Elements(boards.len() as u64));

    for direction in Direction::ALL {
        let name = match direction {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };

        group.bench_function(name, |b| {
            b.iter(|| {
                for board in &boards {
                    let mut board = board.clone();
                    board.push(direction);
                    black_box(board);
                }
            });
        });
    }
}

fn bench_has_moves(c: &mut Criterion) {
    const COUNT: usize = 100;

    let boards = generate_boards(COUNT);

    let mut group = c.benchmark_group("occupancy");
    group.throughput(Throughput::Elements(boards.len() as u64));

    group.bench_function("has_moves", |b| {
        b.iter(|| {
            for board in &boards {
                black_box(board.has_moves());
            }
        });
    });

    group.bench_function("empty_cells", |b| {
        b.iter(|| {
            for board in &boards {
                black_box(board.empty_cells().count());
            }
        });
    });
}

criterion_group!(benches, bench_push, bench_has_moves);
criterion_main!(benches);
