//! Referee loop for whole matches.
//!
//! Agents are abstracted behind the [`MoveSelector`] trait so the referee can
//! be tested with mock agents. Red is the hero of the referee's own state;
//! blue is handed the swapped view. An agent that fails to produce a move
//! surrenders and loses the match.

use std::fmt;
use tracing::{info, trace, warn};

use crate::actions::Move;
use crate::agents::MoveSelector;
use crate::game_state::{Agent, GameState};
use crate::grid::Walls;
use crate::projectiles::ProjectileField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    RedWins,
    BlueWins,
    Tie,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::RedWins => write!(f, "Red player won!"),
            MatchOutcome::BlueWins => write!(f, "Blue player won!"),
            MatchOutcome::Tie => write!(f, "Tie!"),
        }
    }
}

/// How a match came to an end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchEnd {
    /// A projectile hit one or both players
    Hit,
    /// One or both players failed to produce a move
    Surrender,
    RoundLimit,
}

/// Result of a complete match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub end: MatchEnd,
    /// Rounds actually played
    pub rounds: u32,
}

/// Ask one agent for its move. `None` means it surrendered.
fn request_move(
    agent: &mut dyn MoveSelector,
    state: &GameState<'_>,
    player: &str,
    round: u32,
) -> Option<Move> {
    match agent.select_move(state) {
        Ok(mv) => Some(mv),
        Err(err) => {
            warn!(player, round, error = %format!("{:#}", err), "player surrendered");
            None
        }
    }
}

/// Winner when one side was hit or gave up
fn outcome_of(red_lost: bool, blue_lost: bool) -> Option<MatchOutcome> {
    match (red_lost, blue_lost) {
        (true, true) => Some(MatchOutcome::Tie),
        (false, true) => Some(MatchOutcome::RedWins),
        (true, false) => Some(MatchOutcome::BlueWins),
        (false, false) => None,
    }
}

/// A go into a wall is a no-op; everything else is played as chosen
fn referee_move(state: &GameState<'_>, mv: Move, agent: Agent) -> Move {
    match mv {
        Move::Go(_) if !state.is_move_sensible(mv, agent) => Move::Wait,
        _ => mv,
    }
}

/// Play a match on `walls` from the given start cells.
///
/// `observe` is called with the board and round number before the first
/// round and after every round played.
pub fn play_match<F>(
    walls: &Walls,
    red_start: usize,
    blue_start: usize,
    red: &mut dyn MoveSelector,
    blue: &mut dyn MoveSelector,
    max_round: u32,
    mut observe: F,
) -> MatchResult
where
    F: FnMut(&GameState<'_>, u32),
{
    let projectiles = ProjectileField::new(walls.dims().num_cells());
    let mut state = GameState::new(walls, projectiles, red_start, blue_start, max_round);
    observe(&state, 0);

    for round in 0..max_round {
        let red_move = request_move(red, &state, "red", round);
        let blue_move = request_move(blue, &state.swapped(), "blue", round);
        let played = round + 1;

        let (red_move, blue_move) = match (red_move, blue_move) {
            (Some(red_move), Some(blue_move)) => (red_move, blue_move),
            (red_move, blue_move) => {
                observe(&state, played);
                let outcome = outcome_of(red_move.is_none(), blue_move.is_none())
                    .unwrap_or(MatchOutcome::Tie);
                info!(%outcome, rounds = played, "match finished by surrender");
                return MatchResult {
                    outcome,
                    end: MatchEnd::Surrender,
                    rounds: played,
                };
            }
        };
        trace!(round, %red_move, %blue_move, "round");

        let red_move = referee_move(&state, red_move, Agent::Hero);
        let blue_move = referee_move(&state, blue_move, Agent::Enemy);
        state.apply_moves(red_move, blue_move);
        observe(&state, played);

        if let Some(outcome) = outcome_of(state.hero_hit(), state.enemy_hit()) {
            info!(%outcome, rounds = played, "match finished");
            return MatchResult {
                outcome,
                end: MatchEnd::Hit,
                rounds: played,
            };
        }
    }

    info!(rounds = max_round, "match reached the round limit");
    MatchResult {
        outcome: MatchOutcome::Tie,
        end: MatchEnd::RoundLimit,
        rounds: max_round,
    }
}
