#[cfg(feature = "python")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python")]
use pyo3::prelude::*;

use anyhow::Result;

pub mod actions;
pub mod agents;
pub mod board_layer;
pub mod config;
pub mod game_runner;
pub mod game_state;
pub mod ghost;
pub mod grid;
pub mod heuristic;
pub mod minimax;
pub mod projectiles;
pub mod render;
pub mod snapshot;
pub mod verdict;

use crate::agents::SearchAgent;
use crate::config::EngineConfig;
use crate::minimax::SearchResult;
use crate::snapshot::Snapshot;

/// Parse a board snapshot and search for the best move of the player it
/// names.
pub fn select_move(board: &str, config: &EngineConfig) -> Result<SearchResult> {
    let snapshot: Snapshot = board.parse()?;
    let walls = snapshot.walls();
    let state = snapshot.game_state(&walls, config.game.max_round);
    Ok(SearchAgent::new(config.clone()).search(&state))
}

/// Pick a move for a board snapshot.
///
/// # Returns
/// `(move_code, verdict, leaves)` where `move_code` is the integer the game
/// runner expects (0-8).
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "select_move")]
fn py_select_move(board: &str, depth: usize) -> PyResult<(u8, String, u64)> {
    let mut config = EngineConfig::default();
    config.search.depth = depth;
    let result = select_move(board, &config).map_err(|e| PyValueError::new_err(format!("{:#}", e)))?;
    Ok((result.best_move.code(), result.verdict.to_string(), result.leaves))
}

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn off24_rs(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_select_move, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Agent;

    const BOARD: &str = "\
7 7
#   #   #   #   #   #   #
#   R                   #
#    v                  #
#       #       #       #
#                       #
#                 < B   #
#   #   #   #   #   #   #
1
R
";

    #[test]
    fn test_select_move_from_text() {
        let config = EngineConfig::default();
        let result = select_move(BOARD, &config).unwrap();

        let snapshot: Snapshot = BOARD.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, config.game.max_round);
        assert!(state.is_move_sensible(result.best_move, Agent::Hero));
        assert!(result.leaves > 0);
    }

    #[test]
    fn test_select_move_rejects_bad_board() {
        assert!(select_move("7 7\n", &EngineConfig::default()).is_err());
    }
}
