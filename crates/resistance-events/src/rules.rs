//! Rule Types
//!
//! Factions and mission specifications shared by the core and its consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hidden allegiance of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Resistance,
    Spy,
}

impl Faction {
    /// Belief value an agent holds about itself: 1.0 for Resistance, 0.0 for Spy.
    pub fn indicator(self) -> f64 {
        match self {
            Faction::Resistance => 1.0,
            Faction::Spy => 0.0,
        }
    }

    pub fn is_resistance(self) -> bool {
        self == Faction::Resistance
    }

    pub fn is_spy(self) -> bool {
        self == Faction::Spy
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Resistance => write!(f, "resistance"),
            Faction::Spy => write!(f, "spy"),
        }
    }
}

/// Size and failure threshold of a single mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSpec {
    /// Number of agents that go on the mission
    pub team_size: usize,
    /// Number of sabotage contributions needed to fail the mission
    pub fail_threshold: usize,
}

impl MissionSpec {
    pub const fn new(team_size: usize, fail_threshold: usize) -> Self {
        Self {
            team_size,
            fail_threshold,
        }
    }

    /// A mission passes while fewer than `fail_threshold` members sabotage it.
    pub fn passes_with(&self, fails: usize) -> bool {
        fails < self.fail_threshold
    }
}

impl From<(usize, usize)> for MissionSpec {
    fn from((team_size, fail_threshold): (usize, usize)) -> Self {
        Self::new(team_size, fail_threshold)
    }
}
