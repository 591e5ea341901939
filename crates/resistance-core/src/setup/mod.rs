//! Game Setup
//!
//! Role assignment and roster creation.

pub mod roles;

pub use roles::*;

use crate::policy::{AgentPolicy, BasicPolicy};

/// A roster of `n` reference agents sharing one confidence threshold
pub fn basic_roster(n: usize, confidence_threshold: f64) -> Vec<Box<dyn AgentPolicy>> {
    (0..n)
        .map(|_| Box::new(BasicPolicy::new(confidence_threshold)) as Box<dyn AgentPolicy>)
        .collect()
}
