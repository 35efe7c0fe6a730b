use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match3::core::{
    has_run, BoardGenerator, EngineConfig, GameSession, Grid, ItemCatalog, MoveOracle, Resolver,
    SimpleRng,
};

fn solvable_grid(catalog: &ItemCatalog, seed: u32) -> Grid {
    let mut grid = Grid::new(8, 8, catalog.universal()).unwrap();
    BoardGenerator::new(catalog)
        .generate_solvable(&mut grid, &mut SimpleRng::new(seed), false)
        .unwrap();
    grid
}

fn bench_generate_solvable(c: &mut Criterion) {
    let catalog = ItemCatalog::standard();
    let generator = BoardGenerator::new(&catalog);
    let mut grid = Grid::new(8, 8, catalog.universal()).unwrap();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_solvable_8x8", |b| {
        b.iter(|| {
            generator
                .generate_solvable(black_box(&mut grid), &mut rng, false)
                .unwrap()
        })
    });
}

fn bench_exists_legal_move(c: &mut Criterion) {
    let catalog = ItemCatalog::standard();
    let mut grid = solvable_grid(&catalog, 12345);

    c.bench_function("exists_legal_move_8x8", |b| {
        b.iter(|| MoveOracle::exists_legal_move(black_box(&mut grid)))
    });
}

fn bench_has_run(c: &mut Criterion) {
    let catalog = ItemCatalog::standard();
    let grid = solvable_grid(&catalog, 12345);

    c.bench_function("has_run_8x8", |b| b.iter(|| has_run(black_box(&grid))));
}

fn bench_sweep(c: &mut Criterion) {
    let catalog = ItemCatalog::standard();
    let resolver = Resolver::new(&catalog);
    let mut rng = SimpleRng::new(12345);

    c.bench_function("sweep_random_8x8", |b| {
        b.iter(|| {
            let mut grid =
                Grid::from_fn(8, 8, |_| catalog.random_ordinary(&mut rng)).unwrap();
            resolver.sweep(&mut grid, &mut rng, 1_000).unwrap()
        })
    });
}

fn bench_hinted_move(c: &mut Criterion) {
    let config = EngineConfig {
        goal_score: u32::MAX,
        move_budget: u32::MAX,
        ..EngineConfig::default().with_seed(12345)
    };
    let mut session = GameSession::initialize(config, ItemCatalog::standard()).unwrap();

    c.bench_function("hinted_move", |b| {
        b.iter(|| {
            if let Some((first, second)) = session.hint() {
                session.select_cell(first.x, first.y).unwrap();
                black_box(session.select_cell(second.x, second.y).unwrap());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_generate_solvable,
    bench_exists_legal_move,
    bench_has_run,
    bench_sweep,
    bench_hinted_move
);
criterion_main!(benches);
