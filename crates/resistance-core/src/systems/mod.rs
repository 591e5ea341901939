//! Game systems: opinion dynamics and the moderator that drives a game.

pub mod moderator;
pub mod opinion;

pub use moderator::{Moderator, Phase, VoteRound, FINAL_ROUND, MAX_PROPOSALS};
pub use opinion::{
    ConsensusProtocol, DiscussionMode, DiscussionSummary, OpinionEngine, OpinionMessage,
    TargetSelection,
};
