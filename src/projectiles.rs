//! Every in-flight projectile, stored as one board layer per heading.
//!
//! Projectiles are not discrete objects: a projectile is a set bit in the
//! layer of the direction it travels. A cell can hold projectiles of several
//! headings at once, and they never collide with each other.

use crate::actions::{Direction, ALL_DIRECTIONS};
use crate::board_layer::BoardLayer;
use crate::grid::Walls;

#[derive(Debug, PartialEq, Eq)]
pub struct ProjectileField {
    layers: [BoardLayer; 4],
}

impl Clone for ProjectileField {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        for (layer, src) in self.layers.iter_mut().zip(&source.layers) {
            layer.clone_from(src);
        }
    }
}

impl ProjectileField {
    pub fn new(num_cells: usize) -> Self {
        Self {
            layers: std::array::from_fn(|_| BoardLayer::new(num_cells)),
        }
    }

    /// Build a field from explicit (cell, heading) pairs
    pub fn from_list<I>(num_cells: usize, projectiles: I) -> Self
    where
        I: IntoIterator<Item = (usize, Direction)>,
    {
        let mut field = Self::new(num_cells);
        for (cell, dir) in projectiles {
            field.add_at(cell, dir);
        }
        field
    }

    #[inline]
    pub fn add_at(&mut self, cell: usize, dir: Direction) {
        self.layers[dir.index()].set(cell, true);
    }

    #[inline]
    pub fn has(&self, cell: usize, dir: Direction) -> bool {
        self.layers[dir.index()].get(cell)
    }

    pub fn layer(&self, dir: Direction) -> &BoardLayer {
        &self.layers[dir.index()]
    }

    /// Is any projectile at `cell`
    #[inline]
    pub fn occupied(&self, cell: usize) -> bool {
        self.layers.iter().any(|layer| layer.get(cell))
    }

    /// OR of the four heading layers
    pub fn union_across_directions(&self) -> BoardLayer {
        let mut union = self.layers[0].clone();
        for layer in &self.layers[1..] {
            union.union_with(layer);
        }
        union
    }

    /// Spawn a projectile in every direction from every cell of `origins`
    pub fn fire_from(&mut self, origins: &BoardLayer) {
        for layer in self.layers.iter_mut() {
            layer.union_with(origins);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(BoardLayer::is_empty)
    }

    /// Total projectile count, counting each heading separately
    pub fn count(&self) -> u32 {
        self.layers.iter().map(BoardLayer::count).sum()
    }

    /// All projectiles as (cell, heading) pairs, grouped by heading
    pub fn to_list(&self) -> Vec<(usize, Direction)> {
        ALL_DIRECTIONS
            .iter()
            .flat_map(|&dir| self.layer(dir).iter_ones().map(move |cell| (cell, dir)))
            .collect()
    }

    /// Advance every projectile by one round.
    ///
    /// Each layer is shifted one cell along its heading in bulk. Any bit that
    /// lands on a wall is then moved back to the cell it came from with its
    /// heading flipped, so a projectile facing a wall spends the round
    /// turning around instead of moving.
    pub fn advance(&mut self, walls: &Walls) {
        let dims = walls.dims();
        for dir in ALL_DIRECTIONS {
            self.layers[dir.index()].shift(dims.offset(dir));
        }

        // A repaired bit always lands on a non-wall cell, so the order in
        // which walls are visited does not matter.
        for &wall in walls.indices() {
            for dir in ALL_DIRECTIONS {
                if self.layers[dir.index()].get(wall) {
                    self.layers[dir.index()].set(wall, false);
                    let origin = (wall as isize - dims.offset(dir)) as usize;
                    self.layers[dir.flip().index()].set(origin, true);
                }
            }
        }
    }
}
