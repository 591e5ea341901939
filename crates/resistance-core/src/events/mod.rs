//! Event Logging
//!
//! JSONL output of the moderator's event stream.

pub mod logger;

pub use logger::*;
