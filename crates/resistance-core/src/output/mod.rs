//! Output Generation
//!
//! Belief snapshots and their console rendering.

pub mod snapshot;

pub use snapshot::*;
