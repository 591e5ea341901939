//! Belief Snapshots
//!
//! Read-only views of agent beliefs for logs and console output.

use crate::policy::AgentPolicy;
use resistance_events::{AgentBeliefSnapshot, BeliefSnapshot};

/// Copy every agent's beliefs, labelled with the phase they follow.
pub fn snapshot_beliefs(agents: &[Box<dyn AgentPolicy>], phase: &str) -> BeliefSnapshot {
    BeliefSnapshot {
        phase: phase.to_string(),
        agents: agents
            .iter()
            .map(|agent| AgentBeliefSnapshot {
                agent: agent.id(),
                faction: agent.faction(),
                belief: agent.belief().to_vec(),
                fabricated: agent.fabricated_belief().map(<[f64]>::to_vec),
            })
            .collect(),
    }
}

fn format_vector(values: &[f64]) -> String {
    let cells: Vec<String> = values.iter().map(|v| format!("{:.2}", v)).collect();
    format!("[{}]", cells.join(" "))
}

/// One line per agent: real beliefs, plus the cover story for Spies.
pub fn format_beliefs(snapshot: &BeliefSnapshot) -> String {
    let mut out = format!("Opinions after {}:", snapshot.phase);
    for agent in &snapshot.agents {
        out.push_str(&format!(
            "\n{} ({}) real {}",
            agent.agent,
            agent.faction,
            format_vector(&agent.belief)
        ));
        if let Some(fabricated) = &agent.fabricated {
            out.push_str(&format!(" / fake {}", format_vector(fabricated)));
        }
    }
    out
}
