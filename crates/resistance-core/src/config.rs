//! Configuration System
//!
//! Game parameters, loadable from a TOML file so experiments can be tuned
//! without recompiling. Every field has a default; a file only needs the
//! values it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::components::MissionRuleTable;
use crate::error::ConfigurationError;
use crate::policy::basic::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::systems::opinion::{
    ConsensusProtocol, DiscussionMode, OpinionEngine, TargetSelection, DEFAULT_MAX_ROUNDS,
};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "resistance.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game: GameSettings,
    pub opinion: OpinionSettings,
}

/// Table and reproducibility settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of agents (5 to 10)
    pub player_count: usize,
    /// Seed for the game's random source
    pub seed: u64,
    /// Record a belief snapshot after every phase
    pub record_snapshots: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player_count: 5,
            seed: 42,
            record_snapshots: false,
        }
    }
}

/// Opinion dynamics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpinionSettings {
    /// Bounded-confidence threshold δ
    pub confidence_threshold: f64,
    pub protocol: ConsensusProtocol,
    pub targets: TargetSelection,
    /// Round cap when running to convergence
    pub max_rounds: usize,
    pub mode: DiscussionMode,
}

impl Default for OpinionSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            protocol: ConsensusProtocol::default(),
            targets: TargetSelection::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            mode: DiscussionMode::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let content = fs::read_to_string(path.as_ref())?;
        content.parse()
    }

    /// Load `explicit` if given, else `fallback` when that file exists, else
    /// defaults. A file that exists but does not parse is always an error.
    pub fn resolve(
        explicit: Option<&Path>,
        fallback: impl AsRef<Path>,
    ) -> Result<Self, ConfigurationError> {
        let fallback = fallback.as_ref();
        match explicit {
            Some(path) => Self::load(path),
            None if fallback.exists() => Self::load(fallback),
            None => {
                debug!("no {} found, using defaults", fallback.display());
                Ok(Self::default())
            }
        }
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject settings no game can be played with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        MissionRuleTable::specs_for(self.game.player_count)?;

        let delta = self.opinion.confidence_threshold;
        if !(delta > 0.0 && delta <= 1.0) {
            return Err(ConfigurationError::InvalidConfidenceThreshold(delta));
        }

        match self.opinion.mode {
            DiscussionMode::UntilConvergence { epsilon } if !(epsilon > 0.0) => {
                return Err(ConfigurationError::InvalidEpsilon(epsilon));
            }
            DiscussionMode::UntilConvergence { .. } if self.opinion.max_rounds == 0 => {
                return Err(ConfigurationError::ZeroRoundCap);
            }
            _ => {}
        }

        Ok(())
    }

    /// Opinion engine described by these settings
    pub fn engine(&self) -> OpinionEngine {
        OpinionEngine::new(self.opinion.protocol, self.opinion.mode)
            .with_targets(self.opinion.targets)
            .with_max_rounds(self.opinion.max_rounds)
    }
}

impl FromStr for GameConfig {
    type Err = ConfigurationError;

    /// Parse configuration from a TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

/// Generates a commented default configuration file.
pub fn default_config_toml() -> String {
    r#"# Resistance simulator configuration

[game]
# Number of agents, 5 to 10
player_count = 5
seed = 42
# Log every agent's beliefs after each phase
record_snapshots = false

[opinion]
# Bounded-confidence threshold: opinions further than this are ignored
confidence_threshold = 0.5
# "pairwise" or "vector"
protocol = "pairwise"
# "uniform" or "shuffled" (pairwise only)
targets = "uniform"
# Round cap for until_convergence
max_rounds = 1000

[opinion.mode]
kind = "fixed_rounds"
rounds = 3
# kind = "until_convergence"
# epsilon = 0.005
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.game.player_count, 5);
        assert_eq!(config.opinion.confidence_threshold, 0.5);
        assert_eq!(config.opinion.mode, DiscussionMode::FixedRounds { rounds: 3 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed = default_config_toml().parse::<GameConfig>().unwrap();
        assert_eq!(parsed, GameConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GameConfig::from_str(
            r#"
            [game]
            player_count = 8

            [opinion.mode]
            kind = "until_convergence"
            epsilon = 0.01
            "#,
        )
        .unwrap();
        assert_eq!(config.game.player_count, 8);
        assert_eq!(config.game.seed, 42);
        assert_eq!(config.opinion.mode, DiscussionMode::UntilConvergence { epsilon: 0.01 });
        assert_eq!(config.opinion.protocol, ConsensusProtocol::Pairwise);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.game.player_count = 11;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::UnsupportedPlayerCount(11))
        ));

        let mut config = GameConfig::default();
        config.opinion.confidence_threshold = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidConfidenceThreshold(_))
        ));

        let mut config = GameConfig::default();
        config.opinion.mode = DiscussionMode::UntilConvergence { epsilon: 0.0 };
        assert!(matches!(config.validate(), Err(ConfigurationError::InvalidEpsilon(_))));

        let mut config = GameConfig::default();
        config.opinion.mode = DiscussionMode::UntilConvergence { epsilon: 0.005 };
        config.opinion.max_rounds = 0;
        assert!(matches!(config.validate(), Err(ConfigurationError::ZeroRoundCap)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = GameConfig::default();
        config.opinion.protocol = ConsensusProtocol::Vector;
        config.opinion.targets = TargetSelection::Shuffled;
        let text = config.to_toml().unwrap();
        assert_eq!(text.parse::<GameConfig>().unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[game]\nplayer_count = 6\nseed = 7").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.game.player_count, 6);
        assert_eq!(config.game.seed, 7);
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let fallback = dir.path().join("resistance.toml");
        std::fs::write(&explicit, "[game]\nseed = 3").unwrap();
        std::fs::write(&fallback, "[game]\nseed = 4").unwrap();

        let config = GameConfig::resolve(Some(explicit.as_path()), &fallback).unwrap();
        assert_eq!(config.game.seed, 3);
        let config = GameConfig::resolve(None, &fallback).unwrap();
        assert_eq!(config.game.seed, 4);
    }

    #[test]
    fn test_resolve_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::resolve(None, dir.path().join("resistance.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_resolve_rejects_malformed_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("resistance.toml");
        std::fs::write(&fallback, "[game\nplayer_count = ").unwrap();

        let result = GameConfig::resolve(None, &fallback);
        assert!(matches!(result, Err(ConfigurationError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameConfig::load("/definitely/not/here/resistance.toml");
        assert!(matches!(result, Err(ConfigurationError::Io(_))));
    }

    #[test]
    fn test_engine_from_settings() {
        let mut config = GameConfig::default();
        config.opinion.max_rounds = 12;
        let engine = config.engine();
        assert_eq!(engine.max_rounds, 12);
        assert_eq!(engine.protocol, ConsensusProtocol::Pairwise);
    }
}
