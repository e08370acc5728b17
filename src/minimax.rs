//! Depth-limited alpha-beta search over simultaneous rounds.
//!
//! One round is two plies: the hero commits a move without applying it, then
//! the enemy turn applies both moves together and recurses one round deeper.
//! Depth is charged on the enemy turn. Besides the usual bounds, the hero
//! stops as soon as a move wins and the enemy stops as soon as a reply makes
//! the hero lose.
//!
//! Branch states live in a per-round arena: `frames[r]` is the position after
//! `r` rounds along the current line and is only written by the enemy turn of
//! round `r - 1`, which copies its parent over it before applying moves.

use rayon::prelude::*;
use std::num::NonZeroUsize;
use tracing::debug;

use crate::actions::{Move, ALL_MOVES};
use crate::config::HeuristicConfig;
use crate::game_state::{Agent, GameState};
use crate::verdict::Verdict;

#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub verdict: Verdict,
    /// Positions handed to the evaluator
    pub leaves: u64,
}

struct Searcher<'w, 'c> {
    config: &'c HeuristicConfig,
    frames: Vec<GameState<'w>>,
    leaves: u64,
}

impl<'w, 'c> Searcher<'w, 'c> {
    fn new(root: &GameState<'w>, depth: usize, config: &'c HeuristicConfig) -> Self {
        Self {
            config,
            frames: vec![root.clone(); depth + 1],
            leaves: 0,
        }
    }

    fn hero_turn(&mut self, round: usize, depth: usize, alpha: Verdict, beta: Verdict) -> Verdict {
        let state = &self.frames[round];
        if depth == 0 || state.is_terminal() {
            self.leaves += 1;
            return state.evaluate(self.config);
        }
        self.best_hero_move(round, depth, alpha, beta).1
    }

    /// Hero move loop. Never evaluates the frame itself, so it is also the
    /// root step.
    fn best_hero_move(
        &mut self,
        round: usize,
        depth: usize,
        mut alpha: Verdict,
        beta: Verdict,
    ) -> (Move, Verdict) {
        let mut best: Option<(Move, Verdict)> = None;

        for mv in ALL_MOVES {
            if !self.frames[round].is_move_sensible(mv, Agent::Hero) {
                continue;
            }
            let verdict = self.enemy_turn(round, depth, mv, alpha, beta);
            let best_verdict = match best {
                Some((_, b)) if b >= verdict => b,
                _ => {
                    best = Some((mv, verdict));
                    verdict
                }
            };
            if best_verdict.is_win() || best_verdict > beta {
                break;
            }
            alpha = alpha.max(best_verdict);
        }

        // Wait is always sensible, so the loop ran at least once
        best.unwrap_or_else(|| unreachable!("no sensible hero move"))
    }

    fn enemy_turn(
        &mut self,
        round: usize,
        depth: usize,
        hero_move: Move,
        alpha: Verdict,
        mut beta: Verdict,
    ) -> Verdict {
        let mut best: Option<Verdict> = None;

        for mv in ALL_MOVES {
            if !self.frames[round].is_move_sensible(mv, Agent::Enemy) {
                continue;
            }
            let (parents, children) = self.frames.split_at_mut(round + 1);
            let child = &mut children[0];
            child.clone_from(&parents[round]);
            child.apply_moves(hero_move, mv);

            let verdict = self.hero_turn(round + 1, depth - 1, alpha, beta);
            let best_verdict = match best {
                Some(b) if b <= verdict => b,
                _ => verdict,
            };
            best = Some(best_verdict);
            if best_verdict.is_lose() || best_verdict < alpha {
                break;
            }
            beta = beta.min(best_verdict);
        }

        best.unwrap_or_else(|| unreachable!("no sensible enemy move"))
    }
}

/// Pick the hero's move from `root`, searching `depth` full rounds
pub fn search(root: &GameState<'_>, depth: NonZeroUsize, config: &HeuristicConfig) -> SearchResult {
    let depth = depth.get();
    let mut searcher = Searcher::new(root, depth, config);
    let (best_move, verdict) = searcher.best_hero_move(0, depth, Verdict::Lose, Verdict::Win);
    debug!(%best_move, %verdict, leaves = searcher.leaves, "search finished");
    SearchResult {
        best_move,
        verdict,
        leaves: searcher.leaves,
    }
}

/// Search every sensible root move independently, in parallel.
///
/// Each move gets its own arena and a full window, so the verdicts are exact
/// but fewer branches are pruned than in [`search`].
pub fn evaluate_root_moves(
    root: &GameState<'_>,
    depth: NonZeroUsize,
    config: &HeuristicConfig,
) -> Vec<(Move, Verdict, u64)> {
    let depth = depth.get();
    let moves: Vec<Move> = root.sensible_moves(Agent::Hero).collect();

    moves
        .par_iter()
        .map(|&mv| {
            let mut searcher = Searcher::new(root, depth, config);
            let verdict = searcher.enemy_turn(0, depth, mv, Verdict::Lose, Verdict::Win);
            debug!(%mv, %verdict, leaves = searcher.leaves, "root move");
            (mv, verdict, searcher.leaves)
        })
        .collect()
}

/// [`search`] with the root moves split across rayon workers
pub fn search_parallel(
    root: &GameState<'_>,
    depth: NonZeroUsize,
    config: &HeuristicConfig,
) -> SearchResult {
    let evaluated = evaluate_root_moves(root, depth, config);
    let leaves = evaluated.iter().map(|&(_, _, leaves)| leaves).sum();

    // First move in canonical order wins ties
    let mut best: Option<(Move, Verdict)> = None;
    for &(mv, verdict, _) in &evaluated {
        if best.map_or(true, |(_, b)| verdict > b) {
            best = Some((mv, verdict));
        }
    }
    let (best_move, verdict) = best.unwrap_or_else(|| unreachable!("wait is always sensible"));

    SearchResult {
        best_move,
        verdict,
        leaves,
    }
}
