//! Snapshot Types
//!
//! Read-only copies of agent beliefs, taken between phases for analysis and
//! debugging.

use serde::{Deserialize, Serialize};

use crate::Faction;

/// One agent's beliefs at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentBeliefSnapshot {
    pub agent: usize,
    pub faction: Faction,
    /// Trust that each agent is Resistance, indexed by agent id
    pub belief: Vec<f64>,
    /// Outward-facing beliefs (Spies only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabricated: Option<Vec<f64>>,
}

/// Beliefs of every agent after a named phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefSnapshot {
    /// Phase the snapshot was taken after (e.g., "team_select")
    pub phase: String,
    pub agents: Vec<AgentBeliefSnapshot>,
}

impl BeliefSnapshot {
    /// Mean trust the other agents place in `agent`, using their real beliefs.
    pub fn mean_trust_in(&self, agent: usize) -> Option<f64> {
        let values: Vec<f64> = self
            .agents
            .iter()
            .filter(|a| a.agent != agent)
            .filter_map(|a| a.belief.get(agent).copied())
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
