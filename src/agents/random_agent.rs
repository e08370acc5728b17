//! Random agent: any of the nine moves, uniformly.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actions::{Move, ALL_MOVES};
use crate::agents::MoveSelector;
use crate::game_state::GameState;

/// An agent that ignores the board entirely.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
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

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomAgent {
    fn select_move(&mut self, _state: &GameState<'_>) -> Result<Move> {
        Ok(ALL_MOVES[self.rng.gen_range(0..ALL_MOVES.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    const BOARD: &str = "\
5 5
#   #   #   #   #
#   R           #
#               #
#           B   #
#   #   #   #   #
0
R
";

    #[test]
    fn test_random_agent_covers_all_moves() {
        let snapshot: Snapshot = BOARD.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        let mut agent = RandomAgent::with_seed(3);
        let mut seen = [false; 9];
        for _ in 0..500 {
            let mv = agent.select_move(&state).unwrap();
            seen[mv.code() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "some move was never picked: {:?}", seen);
    }

    #[test]
    fn test_seeded_random_agents_agree() {
        let snapshot: Snapshot = BOARD.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);
        for _ in 0..20 {
            assert_eq!(a.select_move(&state).unwrap(), b.select_move(&state).unwrap());
        }
    }
}
