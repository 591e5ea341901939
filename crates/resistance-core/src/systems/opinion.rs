//! Opinion Engine
//!
//! Discussion phases in which agents broadcast opinions and revise beliefs.
//! Two protocols share one engine:
//!
//! - **Pairwise**: each round every agent speaks once, in shuffled order,
//!   about one target. The message is computed once and delivered to every
//!   other agent before the next speaker talks.
//! - **Vector**: each round every agent discloses its whole perceived-opinion
//!   vector and all listeners update simultaneously from that snapshot.
//!
//! A phase runs a fixed number of rounds or until beliefs stop moving.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::components::AgentIndex;
use crate::policy::AgentPolicy;

/// Default convergence tolerance
pub const DEFAULT_EPSILON: f64 = 0.005;

/// Default cap on rounds when running to convergence
pub const DEFAULT_MAX_ROUNDS: usize = 1000;

/// Default number of rounds per discussion phase
pub const DEFAULT_FIXED_ROUNDS: usize = 3;

/// How opinions are exchanged within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusProtocol {
    /// One (about, opinion) message per speaker, bounded-confidence updates
    #[default]
    Pairwise,
    /// Full vectors disclosed at once, weighted simultaneous update
    Vector,
}

/// How a pairwise speaker picks whom to talk about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSelection {
    /// Independent uniform draw per speaker
    #[default]
    Uniform,
    /// A second shuffled permutation zipped with the speakers
    Shuffled,
}

/// When a discussion phase stops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscussionMode {
    FixedRounds { rounds: usize },
    UntilConvergence { epsilon: f64 },
}

impl Default for DiscussionMode {
    fn default() -> Self {
        DiscussionMode::FixedRounds {
            rounds: DEFAULT_FIXED_ROUNDS,
        }
    }
}

/// A single pairwise broadcast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpinionMessage {
    pub speaker: AgentIndex,
    pub about: AgentIndex,
    pub value: f64,
}

/// Result of one discussion phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscussionSummary {
    pub rounds: usize,
    pub converged: bool,
    /// Largest belief change seen in the last round
    pub max_shift: f64,
}

/// Runs discussion phases over a roster
#[derive(Debug, Clone, PartialEq)]
pub struct OpinionEngine {
    pub protocol: ConsensusProtocol,
    pub mode: DiscussionMode,
    pub targets: TargetSelection,
    /// Safety cap for `UntilConvergence`
    pub max_rounds: usize,
}

impl Default for OpinionEngine {
    fn default() -> Self {
        Self {
            protocol: ConsensusProtocol::default(),
            mode: DiscussionMode::default(),
            targets: TargetSelection::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl OpinionEngine {
    pub fn new(protocol: ConsensusProtocol, mode: DiscussionMode) -> Self {
        Self {
            protocol,
            mode,
            ..Self::default()
        }
    }

    pub fn with_targets(mut self, targets: TargetSelection) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Run one discussion phase.
    pub fn discuss<R: Rng>(
        &self,
        agents: &mut [Box<dyn AgentPolicy>],
        rng: &mut R,
    ) -> DiscussionSummary {
        let (limit, epsilon) = match self.mode {
            DiscussionMode::FixedRounds { rounds } => (rounds, None),
            DiscussionMode::UntilConvergence { epsilon } => (self.max_rounds, Some(epsilon)),
        };

        let mut summary = DiscussionSummary {
            rounds: 0,
            converged: false,
            max_shift: 0.0,
        };

        while summary.rounds < limit {
            let before = belief_snapshot(agents);
            self.run_round(agents, rng);
            summary.rounds += 1;
            summary.max_shift = max_shift(&before, &belief_snapshot(agents));

            if let Some(epsilon) = epsilon {
                if summary.max_shift < epsilon {
                    summary.converged = true;
                    break;
                }
            }
        }

        debug!(
            rounds = summary.rounds,
            converged = summary.converged,
            max_shift = summary.max_shift,
            protocol = ?self.protocol,
            "discussion finished"
        );
        summary
    }

    /// One round of the configured protocol.
    pub fn run_round<R: Rng>(&self, agents: &mut [Box<dyn AgentPolicy>], rng: &mut R) {
        match self.protocol {
            ConsensusProtocol::Pairwise => self.pairwise_round(agents, rng),
            ConsensusProtocol::Vector => vector_round(agents),
        }
    }

    fn pairwise_round<R: Rng>(&self, agents: &mut [Box<dyn AgentPolicy>], rng: &mut R) {
        let n = agents.len();
        if n == 0 {
            return;
        }

        let mut speakers: Vec<AgentIndex> = (0..n).collect();
        speakers.shuffle(rng);

        let mut topics: Vec<AgentIndex> = (0..n).collect();
        if self.targets == TargetSelection::Shuffled {
            topics.shuffle(rng);
        }

        for (turn, &speaker) in speakers.iter().enumerate() {
            let about = match self.targets {
                TargetSelection::Uniform => rng.gen_range(0..n),
                TargetSelection::Shuffled => topics[turn],
            };
            let message = OpinionMessage {
                speaker,
                about,
                value: agents[speaker].perceived_opinion(about),
            };
            trace!(speaker, about, value = message.value, "broadcast");
            deliver(agents, message);
        }
    }
}

/// Deliver one message to every listener except the speaker.
pub fn deliver(agents: &mut [Box<dyn AgentPolicy>], message: OpinionMessage) {
    for (listener, agent) in agents.iter_mut().enumerate() {
        if listener == message.speaker {
            continue;
        }
        agent.absorb_opinion(message.about, message.speaker, message.value);
    }
}

fn vector_round(agents: &mut [Box<dyn AgentPolicy>]) {
    let disclosures: Vec<Vec<f64>> = agents.iter().map(|a| a.disclose_opinions()).collect();
    for agent in agents.iter_mut() {
        agent.absorb_consensus(&disclosures);
    }
}

/// Every agent's real and fabricated beliefs, flattened.
fn belief_snapshot(agents: &[Box<dyn AgentPolicy>]) -> Vec<f64> {
    let mut values = Vec::new();
    for agent in agents {
        values.extend_from_slice(agent.belief());
        if let Some(fabricated) = agent.fabricated_belief() {
            values.extend_from_slice(fabricated);
        }
    }
    values
}

fn max_shift(before: &[f64], after: &[f64]) -> f64 {
    before
        .iter()
        .zip(after)
        .map(|(b, a)| (a - b).abs())
        .fold(0.0, f64::max)
}
