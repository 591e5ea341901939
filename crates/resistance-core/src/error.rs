//! Error types for the game core.

use thiserror::Error;

/// Result type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that stop a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// The game could not be set up.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An agent policy broke a game rule.
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

/// Invalid game or file configuration. Fatal at setup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unsupported player count {0} (expected 5 to 10)")]
    UnsupportedPlayerCount(usize),

    #[error("confidence threshold {0} must lie in (0, 1]")]
    InvalidConfidenceThreshold(f64),

    #[error("convergence epsilon {0} must be positive")]
    InvalidEpsilon(f64),

    #[error("discussion round cap must be at least 1")]
    ZeroRoundCap,

    #[error("roster has {actual} agents but the game is configured for {expected}")]
    RosterSizeMismatch { expected: usize, actual: usize },

    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A policy returned something the rules forbid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("team size {team_size} exceeds player count {players}")]
    TeamSizeExceedsPlayers { team_size: usize, players: usize },

    #[error("leader {leader} proposed {actual} members, mission needs {expected}")]
    TeamSizeMismatch {
        leader: usize,
        expected: usize,
        actual: usize,
    },

    #[error("leader {leader} proposed agent {agent} more than once")]
    DuplicateTeamMember { leader: usize, agent: usize },

    #[error("leader {leader} proposed unknown agent {agent}")]
    UnknownAgent { leader: usize, agent: usize },
}
