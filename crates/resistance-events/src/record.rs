//! Game Record
//!
//! Compact summary of a finished game: every proposal, every mission result
//! and the overall outcome.

use serde::{Deserialize, Serialize};

use crate::{Faction, MissionSpec};

/// Number of missions that decides the game (3 of 5)
pub const MISSIONS_TO_WIN: usize = 3;

/// One team proposal and the vote on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub mission: usize,
    pub round: usize,
    pub leader: usize,
    pub team: Vec<usize>,
    pub votes: Vec<bool>,
    pub passed: bool,
}

/// Result of one mission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub mission: usize,
    pub spec: MissionSpec,
    /// Empty when the mission failed on the rejection limit
    pub team: Vec<usize>,
    pub fails: usize,
    pub passed: bool,
    pub vote_limit_reached: bool,
}

/// Cross-mission result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub missions_passed: usize,
    pub missions_failed: usize,
    pub winner: Faction,
}

impl GameOutcome {
    /// Resistance wins on a majority of passed missions, Spies otherwise.
    pub fn from_missions(missions: &[MissionRecord]) -> Self {
        let missions_passed = missions.iter().filter(|m| m.passed).count();
        let missions_failed = missions.len() - missions_passed;
        let winner = if missions_passed >= MISSIONS_TO_WIN {
            Faction::Resistance
        } else {
            Faction::Spy
        };
        Self {
            missions_passed,
            missions_failed,
            winner,
        }
    }
}

/// Everything needed to compare or replay a game's decisions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub player_count: usize,
    pub spies: Vec<usize>,
    pub proposals: Vec<ProposalRecord>,
    pub missions: Vec<MissionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameOutcome>,
}

impl GameRecord {
    /// Sequence of leaders across every proposal of the game.
    pub fn leaders(&self) -> Vec<usize> {
        self.proposals.iter().map(|p| p.leader).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}
