use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tetris_2048::core::{Anchor, EngineConfig, Footprint, Grid, GridEngine, GroundScan};
use tetris_2048::engine::Game;
use tetris_2048::types::{GameAction, Tile, GRID_HEIGHT, GRID_WIDTH};

/// Bottom half filled with alternating values, one hole per row
fn half_full_grid() -> Grid {
    let mut grid = Grid::new(GRID_HEIGHT, GRID_WIDTH);
    for row in 0..GRID_HEIGHT / 2 {
        for col in 0..GRID_WIDTH {
            if col == row % GRID_WIDTH {
                continue;
            }
            let value = if (row + col) % 2 == 0 { 2 } else { 4 };
            grid.place(row as i32, col as i32, Tile::new(value));
        }
    }
    grid
}

fn bench_resolve_landing(c: &mut Criterion) {
    let engine = GridEngine::with_grid(EngineConfig::default(), half_full_grid()).unwrap();
    let piece = Footprint::from_values(&[&[0, 4, 0], &[2, 2, 2]]).unwrap();

    c.bench_function("resolve_landing", |b| {
        b.iter_batched(
            || (engine.clone(), piece.clone()),
            |(mut engine, piece)| engine.resolve_landing(piece, black_box(Anchor::new(4, 10))),
            BatchSize::SmallInput,
        )
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(GRID_HEIGHT, GRID_WIDTH);
            for row in 0..4 {
                for col in 0..GRID_WIDTH {
                    grid.place(row, col as i32, Tile::new(2));
                }
            }
            grid.clear_full_rows()
        })
    });
}

fn bench_merge_columns(c: &mut Criterion) {
    let mut grid = Grid::new(GRID_HEIGHT, GRID_WIDTH);
    for row in 0..GRID_HEIGHT as i32 {
        for col in 0..GRID_WIDTH as i32 {
            grid.place(row, col, Tile::new(2));
        }
    }

    c.bench_function("merge_full_grid", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut grid| grid.merge_columns(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_ground_scan(c: &mut Criterion) {
    let grid = half_full_grid();
    let mut scan = GroundScan::new();

    c.bench_function("ground_scan", |b| b.iter(|| scan.scan(black_box(&grid))));
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = Game::new(EngineConfig::default(), 12345).unwrap();
    game.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            game.apply_action(GameAction::HardDrop);
            if game.finished() {
                game.apply_action(GameAction::Restart);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_landing,
    bench_line_clear,
    bench_merge_columns,
    bench_ground_scan,
    bench_hard_drop
);
criterion_main!(benches);
