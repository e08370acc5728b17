//! Grid geometry, the static wall set and arena tiles.
//!
//! Every cell is addressed by its linear index `row * cols + col`. The outer
//! border is always wall, so stepping one cell in any direction from a
//! non-wall cell stays inside the grid.

use anyhow::{ensure, Result};
use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::actions::Direction;
use crate::board_layer::BoardLayer;

// Tile values - must match the runner's TileType
pub const CELL_FREE: i8 = 0;
pub const CELL_WALL: i8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    rows: usize,
    cols: usize,
}

impl GridDims {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 3 && cols >= 3, "Grid too small: {}x{}", rows, cols);
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_cells(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn coords(&self, cell: usize) -> (usize, usize) {
        debug_assert!(cell < self.num_cells());
        (cell / self.cols, cell % self.cols)
    }

    /// Linear index offset of one step in `dir`
    #[inline]
    pub fn offset(&self, dir: Direction) -> isize {
        match dir {
            Direction::Up => -(self.cols as isize),
            Direction::Down => self.cols as isize,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Neighbor of `cell` one step in `dir`.
    ///
    /// Only valid for cells off the border, which holds for every cell a
    /// player or projectile can occupy.
    #[inline]
    pub fn neighbor(&self, cell: usize, dir: Direction) -> usize {
        let next = cell as isize + self.offset(dir);
        debug_assert!(next >= 0 && (next as usize) < self.num_cells());
        next as usize
    }

    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == self.rows - 1 || col == self.cols - 1
    }
}

/// The immutable wall layout shared by every state in a search.
#[derive(Clone, Debug)]
pub struct Walls {
    dims: GridDims,
    layer: BoardLayer,
    negated: BoardLayer,
    indices: Vec<usize>,
}

impl Walls {
    /// Build from explicit wall cells. The caller guarantees a walled border.
    pub fn from_cells<I>(dims: GridDims, cells: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let layer = BoardLayer::from_cells(dims.num_cells(), cells);
        let negated = layer.negated();
        let indices = layer.iter_ones().collect();
        Self {
            dims,
            layer,
            negated,
            indices,
        }
    }

    /// Build from a tile grid, checking the border is fully walled
    pub fn from_tiles(tiles: &ArrayView2<i8>) -> Result<Self> {
        let dims = GridDims::new(tiles.nrows(), tiles.ncols());
        let mut cells = Vec::new();
        for ((row, col), &tile) in tiles.indexed_iter() {
            if tile == CELL_WALL {
                cells.push(dims.index(row, col));
            } else {
                ensure!(
                    !dims.is_border(row, col),
                    "Border cell ({}, {}) is not a wall",
                    row,
                    col
                );
            }
        }
        Ok(Self::from_cells(dims, cells))
    }

    /// Walls around the edge of an otherwise empty grid
    pub fn bordered(dims: GridDims) -> Self {
        let cells = (0..dims.num_cells()).filter(|&cell| {
            let (row, col) = dims.coords(cell);
            dims.is_border(row, col)
        });
        Self::from_cells(dims, cells)
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn is_wall(&self, cell: usize) -> bool {
        self.layer.get(cell)
    }

    pub fn layer(&self) -> &BoardLayer {
        &self.layer
    }

    /// Every non-wall cell
    pub fn negated(&self) -> &BoardLayer {
        &self.negated
    }

    /// Wall cell indices in ascending order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Tile grid view of the walls
    pub fn to_tiles(&self) -> Array2<i8> {
        Array2::from_shape_fn((self.dims.rows, self.dims.cols), |(row, col)| {
            if self.is_wall(self.dims.index(row, col)) {
                CELL_WALL
            } else {
                CELL_FREE
            }
        })
    }
}

/// Start cells of the red and blue players in a generated arena
pub fn start_cells(dims: GridDims) -> (usize, usize) {
    (
        dims.index(1, 1),
        dims.index(dims.rows - 2, dims.cols - 2),
    )
}

/// Generate a random arena the way the match runner does.
///
/// Places `wall_count / 2` walls, each mirrored through the centre, keeps
/// both start cells free and walls the border.
pub fn generate_arena<R: Rng>(
    rows: usize,
    cols: usize,
    wall_count: usize,
    rng: &mut R,
) -> Result<Array2<i8>> {
    ensure!(
        rows >= 4 && cols >= 4,
        "Arena must be at least 4x4, got {}x{}",
        rows,
        cols
    );

    let mut tiles = Array2::from_elem((rows, cols), CELL_FREE);
    for _ in 0..wall_count / 2 {
        let row = rng.gen_range(0..rows);
        let col = rng.gen_range(0..cols);
        tiles[[row, col]] = CELL_WALL;
        tiles[[rows - row - 1, cols - col - 1]] = CELL_WALL;
    }

    tiles[[1, 1]] = CELL_FREE;
    tiles[[rows - 2, cols - 2]] = CELL_FREE;

    for row in 0..rows {
        tiles[[row, 0]] = CELL_WALL;
        tiles[[row, cols - 1]] = CELL_WALL;
    }
    for col in 0..cols {
        tiles[[0, col]] = CELL_WALL;
        tiles[[rows - 1, col]] = CELL_WALL;
    }

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_index_round_trip_and_neighbors() {
        let dims = GridDims::new(5, 7);
        let cell = dims.index(2, 3);
        assert_eq!(cell, 17);
        assert_eq!(dims.coords(cell), (2, 3));
        assert_eq!(dims.neighbor(cell, Direction::Up), dims.index(1, 3));
        assert_eq!(dims.neighbor(cell, Direction::Down), dims.index(3, 3));
        assert_eq!(dims.neighbor(cell, Direction::Left), dims.index(2, 2));
        assert_eq!(dims.neighbor(cell, Direction::Right), dims.index(2, 4));
    }

    #[test]
    fn test_bordered_walls() {
        let dims = GridDims::new(4, 5);
        let walls = Walls::bordered(dims);
        // 4x5 grid has a 2x3 interior
        assert_eq!(walls.indices().len(), 20 - 6);
        assert_eq!(walls.negated().count(), 6);
        assert!(walls.is_wall(dims.index(0, 2)));
        assert!(!walls.is_wall(dims.index(1, 1)));
    }

    #[test]
    fn test_from_tiles_rejects_open_border() {
        let mut tiles = Walls::bordered(GridDims::new(4, 4)).to_tiles();
        assert!(Walls::from_tiles(&tiles.view()).is_ok());

        tiles[[0, 2]] = CELL_FREE;
        assert!(Walls::from_tiles(&tiles.view()).is_err());
    }

    #[test]
    fn test_generate_arena_is_symmetric_and_walled() {
        let mut rng = StdRng::seed_from_u64(7);
        let tiles = generate_arena(15, 20, 40, &mut rng).unwrap();

        let walls = Walls::from_tiles(&tiles.view()).unwrap();
        let (red, blue) = start_cells(walls.dims());
        assert!(!walls.is_wall(red));
        assert!(!walls.is_wall(blue));

        // The two start cells mirror each other, so clearing them keeps symmetry
        for ((row, col), &tile) in tiles.indexed_iter() {
            let mirrored = tiles[[15 - row - 1, 20 - col - 1]];
            assert_eq!(tile, mirrored, "asymmetric at ({}, {})", row, col);
        }
    }

    #[test]
    fn test_generate_arena_rejects_tiny_grid() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_arena(3, 10, 4, &mut rng).is_err());
    }
}
