//! Move selectors that can play a match.
//!
//! All agents implement the [`MoveSelector`] trait and always see the board
//! from their own side: the hero of the state they get is themselves.

use anyhow::{ensure, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::actions::Move;
use crate::config::EngineConfig;
use crate::game_state::GameState;
use crate::snapshot::PlayerColor;

pub mod cautious_agent;
pub mod exec_agent;
pub mod random_agent;
pub mod search_agent;

pub use cautious_agent::CautiousAgent;
pub use exec_agent::ExecAgent;
pub use random_agent::RandomAgent;
pub use search_agent::SearchAgent;

/// Trait for agents that pick one move per round.
pub trait MoveSelector {
    /// Select the hero's move for the coming round.
    fn select_move(&mut self, state: &GameState<'_>) -> Result<Move>;
}

/// Agent kinds selectable from the command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentKind {
    Search,
    Random,
    Cautious,
    /// Any other name is the path of a player executable
    Exec(PathBuf),
}

impl FromStr for AgentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ensure!(
            !s.is_empty(),
            "Expected search, random, cautious or a player executable"
        );
        Ok(match s {
            "search" => AgentKind::Search,
            "random" => AgentKind::Random,
            "cautious" => AgentKind::Cautious,
            path => AgentKind::Exec(PathBuf::from(path)),
        })
    }
}

/// Build a boxed agent playing `color`. `seed` makes the random agents
/// reproducible.
pub fn create_agent(
    kind: &AgentKind,
    color: PlayerColor,
    config: &EngineConfig,
    seed: Option<u64>,
) -> Box<dyn MoveSelector> {
    match kind {
        AgentKind::Search => Box::new(SearchAgent::new(config.clone())),
        AgentKind::Random => Box::new(match seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        }),
        AgentKind::Cautious => Box::new(match seed {
            Some(seed) => CautiousAgent::with_seed(seed),
            None => CautiousAgent::new(),
        }),
        AgentKind::Exec(path) => Box::new(ExecAgent::new(
            path,
            color,
            config.game.max_round,
            Duration::from_millis(config.game.move_timeout_ms),
        )),
    }
}
