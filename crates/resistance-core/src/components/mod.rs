//! Game Components
//!
//! Agent state and mission rules.

pub mod agent;
pub mod mission;

pub use agent::*;
pub use mission::*;
