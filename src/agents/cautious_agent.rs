//! Cautious agent: random, but never walks into a wall or a projectile.
//!
//! It looks one round ahead at where the projectiles already on the board
//! will be. It only shoots or waits when its own cell stays clear, and only
//! steps onto a neighbour that stays clear. With no such move it waits.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::actions::{Move, ALL_DIRECTIONS};
use crate::agents::MoveSelector;
use crate::game_state::GameState;

pub struct CautiousAgent {
    rng: StdRng,
}

impl CautiousAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CautiousAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves that do not lead straight into a wall or a projectile next round
pub fn safe_moves(state: &GameState<'_>) -> Vec<Move> {
    let walls = state.walls();
    let dims = walls.dims();
    let mut next = state.projectiles().clone();
    next.advance(walls);
    let threat = next.union_across_directions();

    let here = state.hero();
    let can_stay = !threat.get(here);

    let mut moves = Vec::with_capacity(9);
    if can_stay {
        moves.push(Move::Wait);
    }
    for dir in ALL_DIRECTIONS {
        let ahead = dims.neighbor(here, dir);
        if walls.is_wall(ahead) {
            continue;
        }
        if !threat.get(ahead) {
            moves.push(Move::Go(dir));
        }
        if can_stay {
            moves.push(Move::Shoot(dir));
        }
    }
    moves
}

impl MoveSelector for CautiousAgent {
    fn select_move(&mut self, state: &GameState<'_>) -> Result<Move> {
        let moves = safe_moves(state);
        Ok(moves.choose(&mut self.rng).copied().unwrap_or(Move::Wait))
    }
}
