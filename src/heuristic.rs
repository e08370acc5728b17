//! Bounded survival lookahead for positions where nobody is hit yet.
//!
//! Each agent gets two ghost sets seeded at its cell:
//!
//! * conditional: the opponent never shoots, the agent's own ghosts fire in
//!   every direction each round. Only the projectiles already on the board
//!   can kill these ghosts.
//! * unconditional: the ghosts are hunted by everything the opponent's
//!   conditional ghosts fire.
//!
//! For every set we record the last simulated round in which it still had a
//! live ghost and how many ghosts remain at the end.

use crate::config::HeuristicConfig;
use crate::game_state::GameState;
use crate::ghost::GhostSet;
use crate::projectiles::ProjectileField;
use crate::verdict::{SurvivalMeasure, SurvivalReport, Verdict};

/// Rounds the lookahead actually simulates: never past the end of the game
pub fn lookahead_rounds(state: &GameState<'_>, config: &HeuristicConfig) -> u32 {
    config.lookahead_rounds.min(state.rounds_left())
}

/// Run the survival simulation for `rounds` rounds
pub fn survival_report(state: &GameState<'_>, rounds: u32) -> SurvivalReport {
    let walls = state.walls();
    let dims = walls.dims();
    let num_cells = dims.num_cells();
    let open_cells = walls.negated();

    let mut background = state.projectiles().clone();
    let mut hero_fire = ProjectileField::new(num_cells);
    let mut enemy_fire = ProjectileField::new(num_cells);

    let mut hero_conditional = GhostSet::seed(num_cells, state.hero());
    let mut hero_unconditional = hero_conditional.clone();
    let mut enemy_conditional = GhostSet::seed(num_cells, state.enemy());
    let mut enemy_unconditional = enemy_conditional.clone();

    let mut report = SurvivalReport::default();

    for round in 0..rounds {
        hero_fire.fire_from(hero_conditional.cells());
        enemy_fire.fire_from(enemy_conditional.cells());

        for ghosts in [
            &mut hero_conditional,
            &mut hero_unconditional,
            &mut enemy_conditional,
            &mut enemy_unconditional,
        ] {
            ghosts.expand(dims, open_cells);
        }

        background.advance(walls);
        hero_fire.advance(walls);
        enemy_fire.advance(walls);

        let background_threat = background.union_across_directions();
        hero_conditional.eliminate(&background_threat);
        enemy_conditional.eliminate(&background_threat);
        hero_unconditional.eliminate(&enemy_fire.union_across_directions());
        enemy_unconditional.eliminate(&hero_fire.union_across_directions());

        for (measure, ghosts) in [
            (&mut report.hero_conditional, &hero_conditional),
            (&mut report.hero_unconditional, &hero_unconditional),
            (&mut report.enemy_conditional, &enemy_conditional),
            (&mut report.enemy_unconditional, &enemy_unconditional),
        ] {
            if ghosts.count() > 0 {
                measure.rounds = round + 1;
            }
        }
    }

    report.hero_conditional.ghosts = hero_conditional.count();
    report.hero_unconditional.ghosts = hero_unconditional.count();
    report.enemy_conditional.ghosts = enemy_conditional.count();
    report.enemy_unconditional.ghosts = enemy_unconditional.count();
    report
}

/// Scored verdict of a position nobody has been hit in
pub fn evaluate_open(state: &GameState<'_>, config: &HeuristicConfig) -> Verdict {
    let report = survival_report(state, lookahead_rounds(state, config));
    Verdict::scored(report, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    const QUIET_5X5: &str = "\
5 5
#   #   #   #   #
#   R           #
#               #
#           B   #
#   #   #   #   #
1
R
";

    fn measure(rounds: u32, ghosts: u32) -> SurvivalMeasure {
        SurvivalMeasure { rounds, ghosts }
    }

    #[test]
    fn test_zero_rounds_reports_single_ghosts() {
        let snapshot: Snapshot = QUIET_5X5.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        let report = survival_report(&state, 0);
        assert_eq!(report.hero_conditional, measure(0, 1));
        assert_eq!(report.enemy_unconditional, measure(0, 1));
        assert_eq!(report.score(&HeuristicConfig::default()), 0);
    }

    #[test]
    fn test_quiet_board_is_symmetric() {
        let snapshot: Snapshot = QUIET_5X5.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        let report = survival_report(&state, 4);
        // No background fire: conditional ghosts flood the whole 3x3 interior
        assert_eq!(report.hero_conditional, measure(4, 9));
        assert_eq!(report.enemy_conditional, measure(4, 9));
        assert_eq!(report.hero_unconditional, report.enemy_unconditional);
        assert_eq!(report.score(&HeuristicConfig::default()), 0);
    }

    #[test]
    fn test_background_fire_kills_conditional_ghosts() {
        // Hero is sealed in a two-cell pocket that both projectiles sweep
        let snapshot: Snapshot = "\
5 7
#   #   #   #   #   #   #
#   ^v  #               #
#   R   #           B   #
#   #   #               #
#   #   #   #   #   #   #
1
R
"
        .parse()
        .unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        let report = survival_report(&state, 3);
        assert_eq!(report.hero_conditional, measure(0, 0));
        // Nothing the enemy fires can reach the pocket
        assert_eq!(report.hero_unconditional, measure(3, 2));
        assert_eq!(report.enemy_conditional, measure(3, 9));

        let verdict = evaluate_open(&state, &HeuristicConfig::default());
        assert!(!verdict.is_determined());
        assert!(verdict < Verdict::Draw);
    }

    #[test]
    fn test_lookahead_capped_by_remaining_rounds() {
        let snapshot: Snapshot = QUIET_5X5.replace("\n1\n", "\n398\n").parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);
        assert_eq!(state.rounds_left(), 2);
        assert_eq!(lookahead_rounds(&state, &HeuristicConfig::default()), 2);

        let late = snapshot.game_state(&walls, 398);
        assert_eq!(lookahead_rounds(&late, &HeuristicConfig::default()), 0);
    }
}
