//! Shared event types and serialization for the resistance simulator.
//!
//! This crate contains pure data structures with no game logic.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod record;
pub mod rules;
pub mod snapshot;

// Re-export rule types
pub use rules::{Faction, MissionSpec};

// Re-export event types
pub use event::*;

// Re-export record types
pub use record::{GameOutcome, GameRecord, MissionRecord, ProposalRecord};

// Re-export snapshot types
pub use snapshot::{AgentBeliefSnapshot, BeliefSnapshot};
