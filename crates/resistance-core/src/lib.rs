//! Resistance opinion simulator
//!
//! Agents play five missions of The Resistance while revising how much they
//! trust each other through bounded-confidence discussion.

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod policy;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::GameConfig;
pub use error::{ConfigurationError, GameError, InvariantViolation, Result};
pub use policy::{AgentPolicy, BasicPolicy, Recalibration};
pub use systems::{Moderator, Phase};
