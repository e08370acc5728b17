//! Position verdicts and their total order.
//!
//! A verdict is either determined (someone is hit) or a heuristic score built
//! from four survival measures. The order is "better for hero":
//! `Win` beats every non-win, `Lose` loses to every non-lose, and everything
//! else compares by scalar score with `Draw` fixed at [`DRAW_SCORE`].

use std::cmp::Ordering;
use std::fmt;

use crate::config::HeuristicConfig;

/// Scalar value of a draw when compared against scored positions
pub const DRAW_SCORE: i64 = 0;

/// How long a ghost set stayed alive and how much of it was left
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurvivalMeasure {
    /// Last simulated round with at least one live ghost
    pub rounds: u32,
    /// Live ghosts after the final simulated round
    pub ghosts: u32,
}

impl SurvivalMeasure {
    pub fn scalar(&self, round_coeff: i64) -> i64 {
        self.rounds as i64 * round_coeff + self.ghosts as i64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurvivalReport {
    pub hero_conditional: SurvivalMeasure,
    pub hero_unconditional: SurvivalMeasure,
    pub enemy_conditional: SurvivalMeasure,
    pub enemy_unconditional: SurvivalMeasure,
}

impl SurvivalReport {
    /// Weighted linear combination of the four measures
    pub fn score(&self, config: &HeuristicConfig) -> i64 {
        let w = &config.weights;
        let c = config.round_coeff;
        w.hero_conditional * self.hero_conditional.scalar(c)
            + w.hero_unconditional * self.hero_unconditional.scalar(c)
            + w.enemy_conditional * self.enemy_conditional.scalar(c)
            + w.enemy_unconditional * self.enemy_unconditional.scalar(c)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Verdict {
    /// Only the enemy is hit
    Win,
    /// Only the hero is hit
    Lose,
    /// Both are hit
    Draw,
    /// Nobody is hit yet
    Scored { score: i64, report: SurvivalReport },
}

impl Verdict {
    pub fn scored(report: SurvivalReport, config: &HeuristicConfig) -> Self {
        Verdict::Scored {
            score: report.score(config),
            report,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Verdict::Win)
    }

    pub fn is_lose(&self) -> bool {
        matches!(self, Verdict::Lose)
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, Verdict::Scored { .. })
    }

    /// Survival report of a scored verdict
    pub fn report(&self) -> Option<&SurvivalReport> {
        match self {
            Verdict::Scored { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Scalar used when neither side of a comparison is a win or a loss
    fn scalar(&self) -> i64 {
        match self {
            Verdict::Draw => DRAW_SCORE,
            Verdict::Scored { score, .. } => *score,
            Verdict::Win | Verdict::Lose => {
                unreachable!("win and lose are ordered before scalar comparison")
            }
        }
    }
}

impl Ord for Verdict {
    fn cmp(&self, other: &Self) -> Ordering {
        use Verdict::*;
        match (self, other) {
            (Win, Win) | (Lose, Lose) => Ordering::Equal,
            (Win, _) => Ordering::Greater,
            (_, Win) => Ordering::Less,
            (Lose, _) => Ordering::Less,
            (_, Lose) => Ordering::Greater,
            _ => self.scalar().cmp(&other.scalar()),
        }
    }
}

impl PartialOrd for Verdict {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Verdict {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Verdict {}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Win => write!(f, "win"),
            Verdict::Lose => write!(f, "lose"),
            Verdict::Draw => write!(f, "draw"),
            Verdict::Scored { score, report } => write!(
                f,
                "score {} (hero {}/{} {}/{}, enemy {}/{} {}/{})",
                score,
                report.hero_conditional.rounds,
                report.hero_conditional.ghosts,
                report.hero_unconditional.rounds,
                report.hero_unconditional.ghosts,
                report.enemy_conditional.rounds,
                report.enemy_conditional.ghosts,
                report.enemy_unconditional.rounds,
                report.enemy_unconditional.ghosts,
            ),
        }
    }
}
