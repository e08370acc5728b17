//! Engine configuration.
//!
//! Loaded from YAML. Every section and field has a default, so a file only
//! needs to mention what it changes; unknown keys are ignored.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level config.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub heuristic: HeuristicConfig,
    pub game: GameConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Full rounds (hero move + enemy move) searched below the root
    pub depth: usize,
    /// Search each root move on its own rayon worker
    pub parallel_root: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            parallel_root: false,
        }
    }
}

/// Tuning constants of the survival lookahead. None of these are derived
/// from first principles.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Rounds simulated per evaluation (K)
    pub lookahead_rounds: u32,
    /// Weight of one survived round relative to one surviving ghost
    pub round_coeff: i64,
    pub weights: SurvivalWeights,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            lookahead_rounds: 8,
            round_coeff: 1000,
            weights: SurvivalWeights::default(),
        }
    }
}

/// Signed weights of the four survival measures
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurvivalWeights {
    pub hero_conditional: i64,
    pub hero_unconditional: i64,
    pub enemy_conditional: i64,
    pub enemy_unconditional: i64,
}

impl Default for SurvivalWeights {
    fn default() -> Self {
        Self {
            hero_conditional: 1,
            hero_unconditional: 3,
            enemy_conditional: -1,
            enemy_unconditional: -3,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Round number at which the game ends in a tie
    pub max_round: u32,
    /// Time an external player gets per move before it is made to wait
    pub move_timeout_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_round: 400,
            move_timeout_ms: 500,
        }
    }
}

/// Load an `EngineConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: EngineConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    ensure!(config.search.depth >= 1, "search.depth must be at least 1");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let yaml = r#"
search:
  depth: 3
  parallel_root: true
heuristic:
  lookahead_rounds: 5
  round_coeff: 500
  weights:
    hero_conditional: 2
    hero_unconditional: 4
    enemy_conditional: -2
    enemy_unconditional: -4
game:
  max_round: 100
  move_timeout_ms: 2000
"#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(f.path()).unwrap();
        assert_eq!(config.search.depth, 3);
        assert!(config.search.parallel_root);
        assert_eq!(config.heuristic.lookahead_rounds, 5);
        assert_eq!(config.heuristic.round_coeff, 500);
        assert_eq!(config.heuristic.weights.enemy_unconditional, -4);
        assert_eq!(config.game.max_round, 100);
        assert_eq!(config.game.move_timeout_ms, 2000);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let yaml = r#"
heuristic:
  lookahead_rounds: 3
tournament:
  games: 10
"#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(f.path()).unwrap();
        assert_eq!(config.heuristic.lookahead_rounds, 3);
        assert_eq!(config.heuristic.round_coeff, 1000);
        assert_eq!(config.heuristic.weights, SurvivalWeights::default());
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_load_config_rejects_zero_depth() {
        let yaml = "search:\n  depth: 0\n";
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();

        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("/nonexistent/engine.yaml").is_err());
    }
}
