// Tile layout and the permutation being solved.
use rand::Rng;
use rand::seq::SliceRandom;

use crate::surface::Rect;

/// A grid cell, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One square region of the source image, identified by the cell it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub original: Cell,
    size: u32,
}

impl Tile {
    /// Region of the source bitmap this tile shows.
    pub fn source_rect(&self) -> Rect {
        let size = self.size as f64;
        Rect::square(
            self.original.col as f64 * size,
            self.original.row as f64 * size,
            size,
        )
    }
}

/// `tiles[i]` currently sits at `positions[i]`. The positions always form a
/// bijection over the `rows x cols` cells.
#[derive(Clone, Debug)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tile_size: u32,
    tiles: Vec<Tile>,
    positions: Vec<Cell>,
}

impl TileGrid {
    /// Builds a solved grid: tile `i` at row-major cell `i`.
    pub fn new(rows: usize, cols: usize, tile_size: u32) -> Self {
        assert!(rows > 0 && cols > 0, "grid needs at least one row and column");
        assert!(tile_size > 0, "tile size must be positive");
        let mut tiles = Vec::with_capacity(rows * cols);
        let mut positions = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let cell = Cell::new(row, col);
                tiles.push(Tile {
                    original: cell,
                    size: tile_size,
                });
                positions.push(cell);
            }
        }
        Self {
            rows,
            cols,
            tile_size,
            tiles,
            positions,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pixel_width(&self) -> u32 {
        self.tile_size * self.cols as u32
    }

    pub fn pixel_height(&self) -> u32 {
        self.tile_size * self.rows as u32
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn positions(&self) -> &[Cell] {
        &self.positions
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Maps grid-local pixel coordinates to a cell, `None` outside the grid.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<Cell> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let size = self.tile_size as f64;
        let cell = Cell::new((y / size) as usize, (x / size) as usize);
        self.contains(cell).then_some(cell)
    }

    /// Uniform shuffle of the positions. Grids with two or more tiles are
    /// re-rolled until they are not already solved.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        loop {
            self.positions.shuffle(rng);
            if self.positions.len() < 2 || !self.is_solved() {
                break;
            }
        }
    }

    /// Index of the tile currently at `cell`.
    ///
    /// # Panics
    /// If no tile occupies `cell`, which means the bijection was broken or the
    /// cell lies outside the grid.
    pub fn position_index_of(&self, cell: Cell) -> usize {
        self.positions
            .iter()
            .position(|p| *p == cell)
            .unwrap_or_else(|| panic!("no tile at {cell:?} in {}x{} grid", self.rows, self.cols))
    }

    /// Exchanges the tiles at `a` and `b`, returning their indices.
    pub fn swap(&mut self, a: Cell, b: Cell) -> (usize, usize) {
        let ia = self.position_index_of(a);
        let ib = self.position_index_of(b);
        self.positions.swap(ia, ib);
        (ia, ib)
    }

    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .zip(&self.positions)
            .all(|(tile, pos)| tile.original == *pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn assert_bijection(grid: &TileGrid) {
        let seen: HashSet<Cell> = grid.positions().iter().copied().collect();
        assert_eq!(seen.len(), grid.len());
        assert!(seen.iter().all(|c| grid.contains(*c)));
    }

    #[test]
    fn new_grid_is_solved_for_all_sizes() {
        for rows in 1..=5 {
            for cols in 1..=5 {
                let grid = TileGrid::new(rows, cols, 10);
                assert!(grid.is_solved(), "{rows}x{cols} not solved after new");
                assert_eq!(grid.len(), rows * cols);
            }
        }
    }

    #[test]
    fn tiles_are_row_major_with_matching_source_rects() {
        let grid = TileGrid::new(2, 3, 300);
        let t = grid.tiles()[4];
        assert_eq!(t.original, Cell::new(1, 1));
        assert_eq!(t.source_rect(), Rect::square(300.0, 300.0, 300.0));
        assert_eq!(grid.tiles()[2].source_rect(), Rect::square(600.0, 0.0, 300.0));
        assert_eq!(grid.pixel_width(), 900);
        assert_eq!(grid.pixel_height(), 600);
    }

    #[test]
    fn swap_is_an_involution() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = TileGrid::new(3, 3, 300);
        grid.shuffle(&mut rng);
        let before = grid.positions().to_vec();
        let a = Cell::new(0, 2);
        let b = Cell::new(2, 1);
        grid.swap(a, b);
        assert_ne!(grid.positions(), &before[..]);
        grid.swap(a, b);
        assert_eq!(grid.positions(), &before[..]);
    }

    #[test]
    fn swap_with_self_changes_nothing() {
        let mut grid = TileGrid::new(3, 3, 300);
        let (ia, ib) = grid.swap(Cell::new(1, 1), Cell::new(1, 1));
        assert_eq!(ia, ib);
        assert!(grid.is_solved());
    }

    #[test]
    fn random_swaps_keep_bijection() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = TileGrid::new(4, 3, 50);
        for _ in 0..500 {
            let a = Cell::new(rng.gen_range(0..4), rng.gen_range(0..3));
            let b = Cell::new(rng.gen_range(0..4), rng.gen_range(0..3));
            grid.swap(a, b);
            assert_bijection(&grid);
        }
    }

    #[test]
    fn shuffle_never_leaves_grid_solved() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut grid = TileGrid::new(1, 2, 10);
            grid.shuffle(&mut rng);
            assert!(!grid.is_solved());
            assert_bijection(&grid);
        }
        let mut single = TileGrid::new(1, 1, 10);
        single.shuffle(&mut rng);
        assert!(single.is_solved());
    }

    #[test]
    fn shuffle_reaches_every_unsolved_permutation() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut seen: HashSet<Vec<Cell>> = HashSet::new();
        for _ in 0..2000 {
            let mut grid = TileGrid::new(2, 2, 10);
            grid.shuffle(&mut rng);
            assert_bijection(&grid);
            assert!(!grid.is_solved());
            seen.insert(grid.positions().to_vec());
        }
        // 4! orderings minus the solved one.
        assert_eq!(seen.len(), 23);
    }

    #[test]
    fn position_index_of_tracks_swaps() {
        let mut grid = TileGrid::new(3, 3, 300);
        grid.swap(Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(grid.position_index_of(Cell::new(2, 2)), 0);
        assert_eq!(grid.position_index_of(Cell::new(0, 0)), 8);
    }

    #[test]
    #[should_panic(expected = "no tile at")]
    fn position_index_of_outside_grid_panics() {
        let grid = TileGrid::new(3, 3, 300);
        grid.position_index_of(Cell::new(3, 0));
    }

    #[test]
    fn cell_at_rejects_out_of_bounds() {
        let grid = TileGrid::new(3, 3, 300);
        assert_eq!(grid.cell_at(299.0, 0.0), Some(Cell::new(0, 0)));
        assert_eq!(grid.cell_at(300.0, 650.0), Some(Cell::new(2, 1)));
        assert_eq!(grid.cell_at(900.0, 10.0), None);
        assert_eq!(grid.cell_at(-1.0, 10.0), None);
        assert_eq!(grid.cell_at(f64::NAN, 10.0), None);
    }
}
