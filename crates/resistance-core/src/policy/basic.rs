//! Basic Policy
//!
//! Reference strategy. Resistance agents revise beliefs with bounded
//! confidence and multiplicative reinforcement; Spies keep the truth to
//! themselves and revise only the cover story they tell.

use rand::RngCore;
use std::collections::BTreeSet;
use std::iter;

use super::{median, rank_by_trust, AgentPolicy, Recalibration};
use crate::components::{clamp_belief, is_pinned, AgentIndex, AgentState};
use resistance_events::{Faction, MissionSpec};

/// Default bounded-confidence threshold δ
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Multipliers applied during recalibration
pub mod reinforcement {
    /// Leader put the evaluator on the team
    pub const INCLUDED_BY_LEADER: f64 = 1.2;
    /// Leader proposed someone the evaluator suspects
    pub const SUSPECT_PROPOSED: f64 = 0.8;
    /// Agent voted the same way as the evaluator
    pub const VOTED_ALIKE: f64 = 1.2;
    /// Agent voted against the evaluator
    pub const VOTED_AGAINST: f64 = 0.8;
    /// Team member or leader of a passed mission
    pub const MISSION_PASSED: f64 = 1.4;
    /// Team member of a failed mission
    pub const MISSION_FAILED: f64 = 0.75;
    /// Leader (off the team) of a failed mission
    pub const FAILED_LEADER: f64 = 0.8;
}

/// Size of a failed team that reveals its saboteur with certainty
const CONCLUSIVE_TEAM_SIZE: usize = 2;

/// Reference agent policy
#[derive(Debug, Clone)]
pub struct BasicPolicy {
    confidence_threshold: f64,
    state: AgentState,
}

impl Default for BasicPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl BasicPolicy {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            confidence_threshold,
            state: AgentState::unassigned(),
        }
    }

    /// Policy with pre-built state, bypassing role assignment.
    pub fn with_state(confidence_threshold: f64, state: AgentState) -> Self {
        Self {
            confidence_threshold,
            state,
        }
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// The `k` agents this agent trusts least, excluding itself.
    fn least_trusted(&self, k: usize) -> Vec<AgentIndex> {
        let belief = &self.state.belief;
        let mut order: Vec<AgentIndex> = (0..belief.len()).filter(|&j| j != self.state.id).collect();
        order.sort_by(|&a, &b| belief[a].total_cmp(&belief[b]));
        order.truncate(k);
        order
    }

    fn recalibrate_team_selection(&mut self, leader: AgentIndex, team: &[AgentIndex]) {
        let me = self.state.id;
        let suspects = self.least_trusted(team.len());

        if team.contains(&me) {
            self.state.scale_belief(leader, reinforcement::INCLUDED_BY_LEADER);
        }
        for member in team.iter().filter(|&&m| m != me) {
            if suspects.contains(member) {
                self.state.scale_belief(leader, reinforcement::SUSPECT_PROPOSED);
            }
        }
    }

    fn recalibrate_votes(&mut self, votes: &[bool]) {
        let Some(&mine) = votes.get(self.state.id) else {
            return;
        };
        for (agent, &vote) in votes.iter().enumerate() {
            let factor = if vote == mine {
                reinforcement::VOTED_ALIKE
            } else {
                reinforcement::VOTED_AGAINST
            };
            self.state.scale_belief(agent, factor);
        }
    }

    fn recalibrate_mission(&mut self, leader: AgentIndex, passed: bool, team: &[AgentIndex]) {
        let leader_on_team = team.contains(&leader);

        if passed {
            for &member in team {
                self.state.scale_belief(member, reinforcement::MISSION_PASSED);
            }
            if !leader_on_team {
                self.state.scale_belief(leader, reinforcement::MISSION_PASSED);
            }
            return;
        }

        for &member in team {
            if team.len() == CONCLUSIVE_TEAM_SIZE {
                self.state.set_belief(member, 0.0);
            } else {
                self.state.scale_belief(member, reinforcement::MISSION_FAILED);
            }
        }
        if !leader_on_team {
            self.state.scale_belief(leader, reinforcement::FAILED_LEADER);
        }
    }
}

impl AgentPolicy for BasicPolicy {
    fn initialize(&mut self, faction: Faction, n: usize, id: AgentIndex, rng: &mut dyn RngCore) {
        self.state = AgentState::new(faction, n, id, rng);
    }

    fn set_known_spies(&mut self, spies: &[AgentIndex]) {
        self.state.learn_spies(spies);
    }

    fn id(&self) -> AgentIndex {
        self.state.id
    }

    fn faction(&self) -> Faction {
        self.state.faction
    }

    fn belief(&self) -> &[f64] {
        &self.state.belief
    }

    fn fabricated_belief(&self) -> Option<&[f64]> {
        self.state.fabricated.as_deref()
    }

    fn known_spies(&self) -> &BTreeSet<AgentIndex> {
        &self.state.known_spies
    }

    fn perceived_opinion(&self, about: AgentIndex) -> f64 {
        self.state.outward(about)
    }

    fn absorb_opinion(&mut self, about: AgentIndex, speaker: AgentIndex, heard: f64) {
        let me = self.state.id;
        if speaker == me || about == me || about == speaker {
            return;
        }

        // Certainty is judged on real beliefs, even for a Spy's cover story
        match self.state.belief.get(about) {
            Some(&real) if !is_pinned(real) => {}
            _ => return,
        }
        let Some(current) = self.state.revisable().get(about).copied() else {
            return;
        };

        if (current - heard).abs() <= self.confidence_threshold {
            self.state.revisable_mut()[about] = clamp_belief(0.5 * current + 0.5 * heard);
        }
    }

    fn absorb_consensus(&mut self, disclosures: &[Vec<f64>]) {
        let me = self.state.id;
        let delta = self.confidence_threshold;
        let current = self.state.revisable().to_vec();
        let n = current.len();
        let mut next = current.clone();

        for subject in 0..n {
            let certain = self.state.belief.get(subject).map_or(true, |&b| is_pinned(b));
            if subject == me || certain {
                continue;
            }

            // A source's claim about itself carries no weight
            let sources: Vec<AgentIndex> = disclosures
                .iter()
                .enumerate()
                .take(n)
                .filter(|&(source, claims)| {
                    source != subject
                        && claims
                            .get(subject)
                            .map_or(false, |claim| (claim - current[subject]).abs() <= delta)
                })
                .map(|(source, _)| source)
                .collect();

            let row = &mut self.state.weights[subject];
            row.iter_mut().for_each(|w| *w = 0.0);
            if sources.is_empty() {
                continue;
            }

            let weight = 1.0 / sources.len() as f64;
            let mut combined = 0.0;
            for &source in &sources {
                row[source] = weight;
                combined += weight * disclosures[source][subject];
            }
            next[subject] = clamp_belief(combined);
        }

        *self.state.revisable_mut() = next;
    }

    fn select_team(&self, spec: &MissionSpec) -> Vec<AgentIndex> {
        let me = self.state.id;
        let ranked = rank_by_trust(&self.state.belief);

        match self.state.faction {
            Faction::Resistance => ranked.into_iter().take(spec.team_size).collect(),
            // Spies always go on their own missions
            Faction::Spy => iter::once(me)
                .chain(ranked.into_iter().filter(|&j| j != me))
                .take(spec.team_size)
                .collect(),
        }
    }

    fn vote_on_team(&self, team: &[AgentIndex], spec: &MissionSpec, is_final_round: bool) -> bool {
        if is_final_round {
            return true;
        }

        let belief = &self.state.belief;
        let threshold = median(belief);
        let suspected = team
            .iter()
            .filter(|&&j| belief.get(j).map_or(false, |&b| b < threshold))
            .count();

        match self.state.faction {
            Faction::Resistance => suspected == 0,
            Faction::Spy => suspected >= spec.fail_threshold,
        }
    }

    fn execute_mission(&mut self) -> bool {
        self.state.faction.is_resistance()
    }

    fn recalibrate_opinion(&mut self, leader: AgentIndex, evidence: Recalibration<'_>) {
        // Spies already know the truth
        if self.state.faction.is_spy() {
            return;
        }

        match evidence {
            Recalibration::TeamSelection { team } => self.recalibrate_team_selection(leader, team),
            Recalibration::Vote { votes } => self.recalibrate_votes(votes),
            Recalibration::PostMission { passed, team } => {
                self.recalibrate_mission(leader, passed, team)
            }
        }
        self.state.pin_self();
    }
}
