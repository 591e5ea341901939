//! Event Types
//!
//! Everything the moderator reports while driving a game, in the order it
//! happened. Events are plain data so downstream tools can replay a game from
//! its JSONL log.

use serde::{Deserialize, Serialize};

use crate::snapshot::BeliefSnapshot;
use crate::{Faction, MissionSpec};

/// Which of the two discussion phases of a mission ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscussionStage {
    /// Discussion at the start of a mission, before the first proposal
    Opening,
    /// Discussion between a team proposal and the vote on it
    PreVote,
}

/// A single entry in the game log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (e.g., "evt_00000042")
    pub event_id: String,
    /// Zero-based mission index the event belongs to
    pub mission: usize,
    /// Voting round within the mission (0..=5)
    pub round: usize,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Payload of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventKind {
    /// Roles were assigned and the mission table fixed
    GameStarted {
        seed: u64,
        player_count: usize,
        spies: Vec<usize>,
        missions: Vec<MissionSpec>,
    },
    /// A discussion phase finished
    DiscussionFinished {
        stage: DiscussionStage,
        rounds: usize,
        converged: bool,
        max_shift: f64,
    },
    /// The current leader proposed a team
    TeamProposed { leader: usize, team: Vec<usize> },
    /// Every agent voted on the proposed team
    VotesCast {
        votes: Vec<bool>,
        passed: bool,
        final_round: bool,
    },
    /// A mission was executed, or failed on the rejection limit
    MissionResolved {
        team: Vec<usize>,
        fails: usize,
        passed: bool,
        vote_limit_reached: bool,
    },
    /// Read-only copy of every agent's beliefs after a phase
    BeliefsSnapshot(BeliefSnapshot),
    /// All missions were resolved
    GameEnded {
        missions_passed: usize,
        missions_failed: usize,
        winner: Faction,
    },
}

impl EventKind {
    /// Short snake_case label, matching the serialized `event_type`.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::GameStarted { .. } => "game_started",
            EventKind::DiscussionFinished { .. } => "discussion_finished",
            EventKind::TeamProposed { .. } => "team_proposed",
            EventKind::VotesCast { .. } => "votes_cast",
            EventKind::MissionResolved { .. } => "mission_resolved",
            EventKind::BeliefsSnapshot(_) => "beliefs_snapshot",
            EventKind::GameEnded { .. } => "game_ended",
        }
    }
}

impl Event {
    pub fn new(event_id: impl Into<String>, mission: usize, round: usize, kind: EventKind) -> Self {
        Self {
            event_id: event_id.into(),
            mission,
            round,
            kind,
        }
    }

    /// Serializes the event as a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
