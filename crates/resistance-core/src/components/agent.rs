//! Agent State
//!
//! The per-agent data every policy carries: faction, real beliefs, the
//! cover-story beliefs a Spy shows others, consensus weights and spy
//! knowledge.

use rand::{Rng, RngCore};
use std::collections::BTreeSet;

use resistance_events::Faction;

/// Index of an agent in the game roster
pub type AgentIndex = usize;

/// Initial beliefs are drawn from [BELIEF_PRIOR_LOW, BELIEF_PRIOR_LOW + BELIEF_PRIOR_SPREAD)
pub const BELIEF_PRIOR_LOW: f64 = 0.48;
pub const BELIEF_PRIOR_SPREAD: f64 = 0.04;

/// Clamp a belief value into [0, 1]
pub fn clamp_belief(value: f64) -> f64 {
    if value.is_nan() {
        return 0.5;
    }
    value.clamp(0.0, 1.0)
}

/// A value at either extreme is treated as certain and closed to revision
pub fn is_pinned(value: f64) -> bool {
    value == 0.0 || value == 1.0
}

/// Beliefs and knowledge owned by one agent
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub id: AgentIndex,
    pub faction: Faction,
    /// `belief[j]`: trust that agent j is Resistance
    pub belief: Vec<f64>,
    /// Outward-facing beliefs (Spies only)
    pub fabricated: Option<Vec<f64>>,
    /// `weights[subject][source]`: weight given to `source`'s claim about `subject`
    pub weights: Vec<Vec<f64>>,
    pub known_spies: BTreeSet<AgentIndex>,
}

impl AgentState {
    /// Fresh state for agent `id` at a table of `n`.
    ///
    /// Resistance agents start near-neutral about everyone else. Spies know the
    /// truth, so their real beliefs start at 1.0 until the spy set is handed
    /// over, and they get a near-neutral cover story instead.
    pub fn new(faction: Faction, n: usize, id: AgentIndex, rng: &mut dyn RngCore) -> Self {
        let (belief, fabricated) = match faction {
            Faction::Resistance => (neutral_prior(n, id, rng), None),
            Faction::Spy => {
                let mut belief = vec![1.0; n];
                belief[id] = faction.indicator();
                (belief, Some(neutral_prior(n, id, rng)))
            }
        };

        Self {
            id,
            faction,
            belief,
            fabricated,
            weights: initial_weights(n, id),
            known_spies: BTreeSet::new(),
        }
    }

    /// Placeholder held by a policy before roles are assigned.
    pub fn unassigned() -> Self {
        Self {
            id: 0,
            faction: Faction::Resistance,
            belief: Vec::new(),
            fabricated: None,
            weights: Vec::new(),
            known_spies: BTreeSet::new(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.belief.len()
    }

    /// Record the spy set and derive real beliefs from it (Spies only).
    pub fn learn_spies(&mut self, spies: &[AgentIndex]) {
        if self.faction.is_resistance() {
            return;
        }
        self.known_spies = spies.iter().copied().collect();
        for (j, value) in self.belief.iter_mut().enumerate() {
            *value = if self.known_spies.contains(&j) { 0.0 } else { 1.0 };
        }
        self.pin_self();
    }

    /// The vector this agent revises when it hears others: its real beliefs if
    /// Resistance, its cover story if a Spy.
    pub fn revisable(&self) -> &[f64] {
        self.fabricated.as_deref().unwrap_or(self.belief.as_slice())
    }

    pub fn revisable_mut(&mut self) -> &mut Vec<f64> {
        match self.fabricated.as_mut() {
            Some(fabricated) => fabricated,
            None => &mut self.belief,
        }
    }

    /// What this agent tells others about `about`.
    pub fn outward(&self, about: AgentIndex) -> f64 {
        self.revisable()[about]
    }

    /// Multiply `belief[target]` by `factor`, clamped to [0, 1].
    pub fn scale_belief(&mut self, target: AgentIndex, factor: f64) {
        if let Some(value) = self.belief.get_mut(target) {
            *value = clamp_belief(*value * factor);
        }
    }

    pub fn set_belief(&mut self, target: AgentIndex, value: f64) {
        if let Some(slot) = self.belief.get_mut(target) {
            *slot = clamp_belief(value);
        }
    }

    /// Restore `belief[self]` to the true faction indicator.
    pub fn pin_self(&mut self) {
        let indicator = self.faction.indicator();
        if let Some(value) = self.belief.get_mut(self.id) {
            *value = indicator;
        }
    }

    /// True when every belief and fabricated belief lies in [0, 1].
    pub fn within_bounds(&self) -> bool {
        let in_range = |v: &f64| (0.0..=1.0).contains(v);
        self.belief.iter().all(in_range)
            && self
                .fabricated
                .as_ref()
                .map_or(true, |f| f.iter().all(in_range))
    }
}

fn neutral_prior(n: usize, id: AgentIndex, rng: &mut dyn RngCore) -> Vec<f64> {
    let mut prior: Vec<f64> = (0..n)
        .map(|_| BELIEF_PRIOR_LOW + rng.gen::<f64>() * BELIEF_PRIOR_SPREAD)
        .collect();
    // Both factions present themselves as Resistance
    prior[id] = 1.0;
    prior
}

/// Uniform 1/n weights for every subject except self, which only trusts itself.
fn initial_weights(n: usize, id: AgentIndex) -> Vec<Vec<f64>> {
    (0..n)
        .map(|subject| {
            if subject == id {
                (0..n).map(|source| if source == id { 1.0 } else { 0.0 }).collect()
            } else {
                vec![1.0 / n as f64; n]
            }
        })
        .collect()
}
