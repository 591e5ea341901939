//! Role Assignment
//!
//! Splits the roster into Resistance and Spies and shares the spy list among
//! the Spies. Randomness comes only from the RNG passed in.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::components::{AgentIndex, MissionRuleTable};
use crate::policy::AgentPolicy;
use resistance_events::Faction;

/// Who ended up on which side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub factions: Vec<Faction>,
    pub spies: Vec<AgentIndex>,
}

impl RoleAssignment {
    pub fn spy_count(&self) -> usize {
        self.spies.len()
    }

    pub fn is_spy(&self, agent: AgentIndex) -> bool {
        self.factions.get(agent).map_or(false, |f| f.is_spy())
    }
}

/// Assigns factions once per game
pub struct RoleAssigner;

impl RoleAssigner {
    /// Shuffle the roster, deal exactly `1 + (n - 1) / 3` spy roles, initialize
    /// every agent, then hand the spy set to each Spy.
    pub fn assign<R: Rng>(agents: &mut [Box<dyn AgentPolicy>], rng: &mut R) -> RoleAssignment {
        let n = agents.len();
        let spy_total = MissionRuleTable::spy_count(n).min(n);

        // Shuffled seating keeps mixed rosters free of positional bias
        agents.shuffle(rng);

        let mut mask: Vec<Faction> = iter_roles(n, spy_total).collect();
        mask.shuffle(rng);

        for (id, (agent, &faction)) in agents.iter_mut().zip(&mask).enumerate() {
            agent.initialize(faction, n, id, &mut *rng);
        }

        let spies: Vec<AgentIndex> = mask
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_spy())
            .map(|(id, _)| id)
            .collect();

        for agent in agents.iter_mut().filter(|a| a.faction().is_spy()) {
            agent.set_known_spies(&spies);
        }

        debug!(players = n, spies = ?spies, "roles assigned");

        RoleAssignment {
            factions: mask,
            spies,
        }
    }
}

fn iter_roles(n: usize, spies: usize) -> impl Iterator<Item = Faction> {
    std::iter::repeat(Faction::Resistance)
        .take(n - spies)
        .chain(std::iter::repeat(Faction::Spy).take(spies))
}
