//! Reachability tracker used by the heuristic.
//!
//! A ghost set over-approximates every cell an agent could still be standing
//! on after some rounds of unconstrained movement. It is never the agent's
//! real position.

use crate::actions::ALL_DIRECTIONS;
use crate::board_layer::BoardLayer;
use crate::grid::GridDims;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GhostSet {
    cells: BoardLayer,
}

impl GhostSet {
    /// A single ghost at `cell`
    pub fn seed(num_cells: usize, cell: usize) -> Self {
        Self {
            cells: BoardLayer::from_cells(num_cells, [cell]),
        }
    }

    pub fn cells(&self) -> &BoardLayer {
        &self.cells
    }

    /// One 4-connected flood-fill step, bounded by `open_cells`
    pub fn expand(&mut self, dims: GridDims, open_cells: &BoardLayer) {
        let mut spread = self.cells.clone();
        for dir in ALL_DIRECTIONS {
            spread.union_with(&self.cells.shifted(dims.offset(dir)));
        }
        spread.intersect_with(open_cells);
        self.cells = spread;
    }

    /// Drop every ghost standing on a threatened cell
    pub fn eliminate(&mut self, threat: &BoardLayer) {
        self.cells.subtract(threat);
    }

    pub fn count(&self) -> u32 {
        self.cells.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Walls;

    #[test]
    fn test_expand_grows_diamond_inside_walls() {
        let walls = Walls::bordered(GridDims::new(7, 7));
        let dims = walls.dims();
        let mut ghosts = GhostSet::seed(dims.num_cells(), dims.index(3, 3));

        ghosts.expand(dims, walls.negated());
        assert_eq!(ghosts.count(), 5);

        ghosts.expand(dims, walls.negated());
        assert_eq!(ghosts.count(), 13);

        // Interior is 5x5; two more steps fill it
        ghosts.expand(dims, walls.negated());
        ghosts.expand(dims, walls.negated());
        assert_eq!(ghosts.count(), 25);
        assert!(ghosts.cells().iter_ones().all(|c| !walls.is_wall(c)));
    }

    #[test]
    fn test_expand_respects_inner_walls() {
        let dims = GridDims::new(5, 5);
        let mut wall_cells: Vec<usize> = Walls::bordered(dims).indices().to_vec();
        // Wall off the middle column completely
        wall_cells.extend([dims.index(1, 2), dims.index(2, 2), dims.index(3, 2)]);
        let walls = Walls::from_cells(dims, wall_cells);

        let mut ghosts = GhostSet::seed(dims.num_cells(), dims.index(2, 1));
        for _ in 0..10 {
            ghosts.expand(dims, walls.negated());
        }
        assert_eq!(ghosts.count(), 3);
        assert!(ghosts.cells().iter_ones().all(|c| dims.coords(c).1 == 1));
    }

    #[test]
    fn test_eliminate_clears_threatened_cells() {
        let walls = Walls::bordered(GridDims::new(5, 5));
        let dims = walls.dims();
        let mut ghosts = GhostSet::seed(dims.num_cells(), dims.index(2, 2));
        ghosts.expand(dims, walls.negated());

        let threat = BoardLayer::from_cells(dims.num_cells(), [dims.index(2, 2), dims.index(1, 2)]);
        ghosts.eliminate(&threat);
        assert_eq!(ghosts.count(), 3);
        assert!(!ghosts.cells().get(dims.index(2, 2)));
    }
}
