//! Properties of the grid, the move oracle and the generator over many boards

use match3::core::{
    can_pop, has_run, BoardGenerator, Grid, Item, ItemCatalog, MoveOracle, SimpleRng,
};
use match3::types::Position;

/// Mostly ordinary items, with the occasional special or universal mixed in
fn random_grid(catalog: &ItemCatalog, width: usize, height: usize, seed: u32) -> Grid {
    let mut rng = SimpleRng::new(seed);
    let specials: Vec<Item> = ["bear_FourPiece", "frog_DoubleThree", "universal"]
        .iter()
        .filter_map(|name| catalog.lookup(name))
        .collect();

    Grid::from_fn(width, height, |_| {
        if rng.next_range(20) == 0 {
            specials[rng.next_index(specials.len())].clone()
        } else {
            catalog.random_ordinary(&mut rng)
        }
    })
    .unwrap()
}

#[test]
fn test_swap_is_an_involution() {
    let catalog = ItemCatalog::standard();
    for seed in 1..30 {
        let original = random_grid(&catalog, 7, 5, seed);
        let mut grid = original.clone();
        let mut rng = SimpleRng::new(seed + 100);

        for _ in 0..20 {
            let a = Position::new(rng.next_index(7), rng.next_index(5));
            let b = Position::new(rng.next_index(7), rng.next_index(5));
            grid.swap(a, b);
            grid.swap(a, b);
            assert_eq!(grid, original);
        }
    }
}

#[test]
fn test_swap_keeps_cell_coordinates() {
    let catalog = ItemCatalog::standard();
    let mut grid = random_grid(&catalog, 4, 4, 3);
    grid.swap(Position::new(0, 0), Position::new(0, 1));
    for cell in grid.cells() {
        assert!(grid.contains(cell.position()));
        assert_eq!(grid.get(cell.x, cell.y).unwrap().position(), cell.position());
    }
}

#[test]
fn test_oracle_never_changes_the_grid() {
    let catalog = ItemCatalog::standard();
    for seed in 1..60 {
        let original = random_grid(&catalog, 6, 6, seed);
        let mut grid = original.clone();

        let exists = MoveOracle::exists_legal_move(&mut grid);
        assert_eq!(grid, original, "seed {} mutated by exists_legal_move", seed);

        let found = MoveOracle::find_legal_move(&mut grid);
        assert_eq!(grid, original, "seed {} mutated by find_legal_move", seed);
        assert_eq!(exists, found.is_some());
    }
}

#[test]
fn test_found_move_really_pops() {
    let catalog = ItemCatalog::standard();
    for seed in 1..40 {
        let mut grid = random_grid(&catalog, 6, 6, seed);
        if let Some((a, b)) = MoveOracle::find_legal_move(&mut grid) {
            assert!(a.is_adjacent(b));
            grid.swap(a, b);
            assert!(can_pop(&grid));
        }
    }
}

#[test]
fn test_generated_boards_are_solvable() {
    let catalog = ItemCatalog::standard();
    let generator = BoardGenerator::new(&catalog);

    for (width, height) in [(8, 8), (6, 6), (5, 9), (3, 3)] {
        for seed in 1..8 {
            let mut grid = Grid::new(width, height, catalog.universal()).unwrap();
            let mut rng = SimpleRng::new(seed);
            generator.generate_solvable(&mut grid, &mut rng, false).unwrap();

            assert!(!can_pop(&grid), "{}x{} seed {} pops", width, height, seed);
            assert!(MoveOracle::exists_legal_move(&mut grid));
        }
    }
}

#[test]
fn test_preserving_fill_keeps_board_stable() {
    let catalog = ItemCatalog::standard();
    let generator = BoardGenerator::new(&catalog);

    let mut grid = Grid::new(6, 6, catalog.universal()).unwrap();
    let mut rng = SimpleRng::new(11);
    generator.generate_solvable(&mut grid, &mut rng, false).unwrap();
    let four = catalog.lookup("panda_FourPiece").unwrap();
    grid.set(Position::new(2, 2), four.clone());

    generator.generate_solvable(&mut grid, &mut rng, true).unwrap();
    assert_eq!(grid.item_at(Position::new(2, 2)), Some(&four));
    assert!(!has_run(&grid));
    assert!(MoveOracle::exists_legal_move(&mut grid));
}
