//! Agent Policies
//!
//! The capability set every agent exposes to the moderator and the opinion
//! engine. Policies own their beliefs; nothing else writes to them.

pub mod basic;

pub use basic::BasicPolicy;

use rand::RngCore;
use std::collections::BTreeSet;

use crate::components::AgentIndex;
use resistance_events::{Faction, MissionSpec};

/// Phase-specific evidence handed to `recalibrate_opinion`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recalibration<'a> {
    /// The leader proposed `team`
    TeamSelection { team: &'a [AgentIndex] },
    /// Everyone voted; `votes[j]` is agent j's vote
    Vote { votes: &'a [bool] },
    /// The mission ran with `team` and `passed` or failed
    PostMission { passed: bool, team: &'a [AgentIndex] },
}

impl Recalibration<'_> {
    pub fn phase_name(&self) -> &'static str {
        match self {
            Recalibration::TeamSelection { .. } => "team_sel",
            Recalibration::Vote { .. } => "vote",
            Recalibration::PostMission { .. } => "post_mission",
        }
    }
}

/// Decision and belief-update contract of a game agent
pub trait AgentPolicy: Send {
    /// Set up beliefs for agent `id` of faction `faction` at a table of `n`.
    fn initialize(&mut self, faction: Faction, n: usize, id: AgentIndex, rng: &mut dyn RngCore);

    /// Hand over the full spy set. Only Spies keep it.
    fn set_known_spies(&mut self, spies: &[AgentIndex]);

    fn id(&self) -> AgentIndex;

    fn faction(&self) -> Faction;

    /// Real beliefs, indexed by agent id.
    fn belief(&self) -> &[f64];

    /// Outward-facing beliefs, if this agent keeps a separate cover story.
    fn fabricated_belief(&self) -> Option<&[f64]>;

    fn known_spies(&self) -> &BTreeSet<AgentIndex>;

    /// What this agent tells others about `about`.
    fn perceived_opinion(&self, about: AgentIndex) -> f64;

    /// Hear `speaker` claim `heard` about `about`.
    fn absorb_opinion(&mut self, about: AgentIndex, speaker: AgentIndex, heard: f64);

    /// Full perceived-opinion vector, disclosed once per vector consensus round.
    fn disclose_opinions(&self) -> Vec<f64> {
        (0..self.belief().len())
            .map(|about| self.perceived_opinion(about))
            .collect()
    }

    /// Simultaneous update from every agent's disclosed vector
    /// (`disclosures[source][subject]`).
    fn absorb_consensus(&mut self, disclosures: &[Vec<f64>]);

    /// Propose an ordered team of `spec.team_size` distinct agents.
    fn select_team(&self, spec: &MissionSpec) -> Vec<AgentIndex>;

    fn vote_on_team(&self, team: &[AgentIndex], spec: &MissionSpec, is_final_round: bool) -> bool;

    /// Contribution to a mission this agent is on: `true` cooperates, `false` sabotages.
    fn execute_mission(&mut self) -> bool;

    fn recalibrate_opinion(&mut self, leader: AgentIndex, evidence: Recalibration<'_>);
}

/// Median of a belief vector; the mean of the middle pair for even lengths.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Agent ids ordered by descending belief, ties broken by lower id.
pub fn rank_by_trust(belief: &[f64]) -> Vec<AgentIndex> {
    let mut order: Vec<AgentIndex> = (0..belief.len()).collect();
    order.sort_by(|&a, &b| belief[b].total_cmp(&belief[a]));
    order
}
