//! Agent backed by the alpha-beta search.

use anyhow::Result;
use std::num::NonZeroUsize;
use tracing::info;

use crate::actions::Move;
use crate::agents::MoveSelector;
use crate::config::EngineConfig;
use crate::game_state::GameState;
use crate::minimax::{search, search_parallel, SearchResult};

pub struct SearchAgent {
    config: EngineConfig,
}

impl SearchAgent {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Configured depth, capped by the rounds left in the game but never
    /// below one
    pub fn depth_for(&self, state: &GameState<'_>) -> NonZeroUsize {
        let depth = self.config.search.depth.min(state.rounds_left() as usize);
        NonZeroUsize::new(depth).unwrap_or(NonZeroUsize::MIN)
    }

    /// Run the search and return the full result
    pub fn search(&self, state: &GameState<'_>) -> SearchResult {
        let depth = self.depth_for(state);
        let heuristic = &self.config.heuristic;
        if self.config.search.parallel_root {
            search_parallel(state, depth, heuristic)
        } else {
            search(state, depth, heuristic)
        }
    }
}

impl MoveSelector for SearchAgent {
    fn select_move(&mut self, state: &GameState<'_>) -> Result<Move> {
        let result = self.search(state);
        info!(
            best_move = %result.best_move,
            verdict = %result.verdict,
            leaves = result.leaves,
            "search agent move"
        );
        Ok(result.best_move)
    }
}
