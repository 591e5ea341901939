//! Moderator
//!
//! Drives a game from setup to the end of the fifth mission as a phase state
//! machine:
//!
//! ```text
//! Setup -> Discussion1 -> TeamSelect -> RecalibrateTeamSel -> Discussion2
//!       -> Voting -> RecalibrateVote -> MissionExecute -> RecalibratePostMission
//!       -> NextMission -> (Discussion1 | GameEnd)
//! ```
//!
//! A rejected vote rotates the leader and returns to `TeamSelect`. The sixth
//! proposal of a mission is forced through by the final-round rule; if a
//! policy rejects it anyway the mission fails without being played.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

use crate::components::{AgentIndex, MissionRuleTable, MISSIONS_PER_GAME};
use crate::config::GameConfig;
use crate::error::{ConfigurationError, InvariantViolation, Result};
use crate::output::snapshot_beliefs;
use crate::policy::{AgentPolicy, Recalibration};
use crate::setup::{basic_roster, RoleAssigner, RoleAssignment};
use crate::systems::opinion::OpinionEngine;
use resistance_events::{
    generate_event_id, DiscussionStage, Event, EventKind, GameOutcome, GameRecord, MissionRecord,
    MissionSpec, ProposalRecord,
};

/// Round number on which every agent must approve the proposal
pub const FINAL_ROUND: usize = 5;

/// Proposals per mission before it fails outright
pub const MAX_PROPOSALS: usize = FINAL_ROUND + 1;

/// Phases of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Discussion1,
    TeamSelect,
    RecalibrateTeamSel,
    Discussion2,
    Voting,
    RecalibrateVote,
    MissionExecute,
    RecalibratePostMission,
    NextMission,
    GameEnd,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Discussion1 => "discussion_1",
            Phase::TeamSelect => "team_select",
            Phase::RecalibrateTeamSel => "recalibrate_team_sel",
            Phase::Discussion2 => "discussion_2",
            Phase::Voting => "voting",
            Phase::RecalibrateVote => "recalibrate_vote",
            Phase::MissionExecute => "mission_execute",
            Phase::RecalibratePostMission => "recalibrate_post_mission",
            Phase::NextMission => "next_mission",
            Phase::GameEnd => "game_end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The proposal currently on the table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteRound {
    pub round_number: usize,
    pub proposed_team: Vec<AgentIndex>,
    /// One vote per agent, empty until the vote is held
    pub votes: Vec<bool>,
    pub is_final_round: bool,
    pub passed: Option<bool>,
}

/// A strict majority of the table must approve.
pub fn vote_passes(votes: &[bool]) -> bool {
    let yes = votes.iter().filter(|&&v| v).count();
    yes > votes.len() / 2
}

/// Count sabotage contributions and decide the mission.
pub fn resolve_mission(contributions: &[bool], spec: &MissionSpec) -> (usize, bool) {
    let fails = contributions.iter().filter(|&&c| !c).count();
    (fails, spec.passes_with(fails))
}

/// Check a proposed team against the mission and the table.
pub fn validate_team(
    leader: AgentIndex,
    team: &[AgentIndex],
    spec: &MissionSpec,
    players: usize,
) -> std::result::Result<(), InvariantViolation> {
    if team.len() != spec.team_size {
        return Err(InvariantViolation::TeamSizeMismatch {
            leader,
            expected: spec.team_size,
            actual: team.len(),
        });
    }
    let mut seen = HashSet::with_capacity(team.len());
    for &agent in team {
        if agent >= players {
            return Err(InvariantViolation::UnknownAgent { leader, agent });
        }
        if !seen.insert(agent) {
            return Err(InvariantViolation::DuplicateTeamMember { leader, agent });
        }
    }
    Ok(())
}

fn recalibrate_all(
    agents: &mut [Box<dyn AgentPolicy>],
    leader: AgentIndex,
    evidence: Recalibration<'_>,
) {
    for agent in agents.iter_mut() {
        agent.recalibrate_opinion(leader, evidence);
    }
}

/// Runs one game
pub struct Moderator {
    config: GameConfig,
    agents: Vec<Box<dyn AgentPolicy>>,
    engine: OpinionEngine,
    rng: SmallRng,
    missions: [MissionSpec; MISSIONS_PER_GAME],
    phase: Phase,
    current_leader: AgentIndex,
    mission_index: usize,
    vote_round: VoteRound,
    roles: Option<RoleAssignment>,
    record: GameRecord,
    events: Vec<Event>,
    next_event: u64,
}

impl Moderator {
    /// Validate the configuration and seat `agents`. Roles are dealt on the
    /// first `step`.
    pub fn new(config: GameConfig, agents: Vec<Box<dyn AgentPolicy>>) -> Result<Self> {
        config.validate()?;

        let players = config.game.player_count;
        if agents.len() != players {
            return Err(ConfigurationError::RosterSizeMismatch {
                expected: players,
                actual: agents.len(),
            }
            .into());
        }

        let missions = MissionRuleTable::specs_for(players)?;
        if let Some(spec) = missions.iter().find(|s| s.team_size > players) {
            return Err(InvariantViolation::TeamSizeExceedsPlayers {
                team_size: spec.team_size,
                players,
            }
            .into());
        }

        Ok(Self {
            engine: config.engine(),
            rng: SmallRng::seed_from_u64(config.game.seed),
            record: GameRecord {
                seed: config.game.seed,
                player_count: players,
                ..GameRecord::default()
            },
            config,
            agents,
            missions,
            phase: Phase::Setup,
            current_leader: 0,
            mission_index: 0,
            vote_round: VoteRound::default(),
            roles: None,
            events: Vec::new(),
            next_event: 1,
        })
    }

    /// A game of reference agents sharing the configured confidence threshold.
    pub fn with_basic_agents(config: GameConfig) -> Result<Self> {
        let agents = basic_roster(config.game.player_count, config.opinion.confidence_threshold);
        Self::new(config, agents)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_leader(&self) -> AgentIndex {
        self.current_leader
    }

    pub fn mission_index(&self) -> usize {
        self.mission_index
    }

    pub fn missions(&self) -> &[MissionSpec] {
        &self.missions
    }

    pub fn agents(&self) -> &[Box<dyn AgentPolicy>] {
        &self.agents
    }

    pub fn vote_round(&self) -> &VoteRound {
        &self.vote_round
    }

    pub fn roles(&self) -> Option<&RoleAssignment> {
        self.roles.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Hand over the events recorded so far.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::GameEnd
    }

    /// Drive the game to `GameEnd`.
    pub fn run(&mut self) -> Result<&GameRecord> {
        while !self.is_finished() {
            self.step()?;
        }
        Ok(&self.record)
    }

    /// Execute the current phase and move to the next one.
    pub fn step(&mut self) -> Result<Phase> {
        let next = match self.phase {
            Phase::Setup => self.setup(),
            Phase::Discussion1 => {
                self.discuss(DiscussionStage::Opening);
                Phase::TeamSelect
            }
            Phase::TeamSelect => self.select_team()?,
            Phase::RecalibrateTeamSel => {
                recalibrate_all(
                    &mut self.agents,
                    self.current_leader,
                    Recalibration::TeamSelection {
                        team: &self.vote_round.proposed_team,
                    },
                );
                self.snapshot(Phase::RecalibrateTeamSel);
                Phase::Discussion2
            }
            Phase::Discussion2 => {
                self.discuss(DiscussionStage::PreVote);
                Phase::Voting
            }
            Phase::Voting => self.hold_vote(),
            Phase::RecalibrateVote => self.recalibrate_vote(),
            Phase::MissionExecute => self.execute_mission(),
            Phase::RecalibratePostMission => self.recalibrate_post_mission(),
            Phase::NextMission => self.next_mission(),
            Phase::GameEnd => Phase::GameEnd,
        };

        debug!(from = %self.phase, to = %next, mission = self.mission_index, "phase transition");
        self.phase = next;
        Ok(next)
    }

    fn current_spec(&self) -> MissionSpec {
        self.missions[self.mission_index]
    }

    fn rotate_leader(&mut self) {
        self.current_leader = (self.current_leader + 1) % self.agents.len();
    }

    fn emit(&mut self, kind: EventKind) {
        let event = Event::new(
            generate_event_id(self.next_event),
            self.mission_index,
            self.vote_round.round_number,
            kind,
        );
        self.next_event += 1;
        self.events.push(event);
    }

    fn snapshot(&mut self, after: Phase) {
        if self.config.game.record_snapshots {
            let snapshot = snapshot_beliefs(&self.agents, after.name());
            self.emit(EventKind::BeliefsSnapshot(snapshot));
        }
    }

    fn setup(&mut self) -> Phase {
        let roles = RoleAssigner::assign(&mut self.agents, &mut self.rng);
        self.current_leader = 0;
        self.record.spies = roles.spies.clone();

        info!(
            players = self.agents.len(),
            spies = ?roles.spies,
            seed = self.config.game.seed,
            "game started"
        );
        self.emit(EventKind::GameStarted {
            seed: self.config.game.seed,
            player_count: self.agents.len(),
            spies: roles.spies.clone(),
            missions: self.missions.to_vec(),
        });
        self.roles = Some(roles);
        self.snapshot(Phase::Setup);
        Phase::Discussion1
    }

    fn discuss(&mut self, stage: DiscussionStage) {
        let summary = self.engine.discuss(&mut self.agents, &mut self.rng);
        self.emit(EventKind::DiscussionFinished {
            stage,
            rounds: summary.rounds,
            converged: summary.converged,
            max_shift: summary.max_shift,
        });
        self.snapshot(match stage {
            DiscussionStage::Opening => Phase::Discussion1,
            DiscussionStage::PreVote => Phase::Discussion2,
        });
    }

    fn select_team(&mut self) -> Result<Phase> {
        if self.vote_round.round_number >= MAX_PROPOSALS {
            return Ok(self.fail_on_vote_limit());
        }

        let spec = self.current_spec();
        let leader = self.current_leader;
        let team = self.agents[leader].select_team(&spec);
        validate_team(leader, &team, &spec, self.agents.len())?;

        debug!(leader, team = ?team, round = self.vote_round.round_number, "team proposed");
        self.vote_round.proposed_team = team.clone();
        self.vote_round.votes.clear();
        self.vote_round.passed = None;
        self.vote_round.is_final_round = self.vote_round.round_number == FINAL_ROUND;

        self.emit(EventKind::TeamProposed { leader, team });
        Ok(Phase::RecalibrateTeamSel)
    }

    fn hold_vote(&mut self) -> Phase {
        let spec = self.current_spec();
        let team = &self.vote_round.proposed_team;
        let is_final = self.vote_round.is_final_round;

        let votes: Vec<bool> = self
            .agents
            .iter()
            .map(|agent| agent.vote_on_team(team, &spec, is_final))
            .collect();
        let passed = vote_passes(&votes);

        debug!(votes = ?votes, passed, final_round = is_final, "votes cast");
        self.record.proposals.push(ProposalRecord {
            mission: self.mission_index,
            round: self.vote_round.round_number,
            leader: self.current_leader,
            team: team.clone(),
            votes: votes.clone(),
            passed,
        });
        self.vote_round.votes = votes.clone();
        self.vote_round.passed = Some(passed);

        self.emit(EventKind::VotesCast {
            votes,
            passed,
            final_round: is_final,
        });
        Phase::RecalibrateVote
    }

    fn recalibrate_vote(&mut self) -> Phase {
        recalibrate_all(
            &mut self.agents,
            self.current_leader,
            Recalibration::Vote {
                votes: &self.vote_round.votes,
            },
        );
        self.snapshot(Phase::RecalibrateVote);

        if self.vote_round.passed == Some(true) {
            return Phase::MissionExecute;
        }

        self.rotate_leader();
        self.vote_round.round_number += 1;
        Phase::TeamSelect
    }

    fn execute_mission(&mut self) -> Phase {
        let spec = self.current_spec();
        let team = self.vote_round.proposed_team.clone();

        let mut contributions = Vec::with_capacity(team.len());
        for &member in &team {
            contributions.push(self.agents[member].execute_mission());
        }
        let (fails, passed) = resolve_mission(&contributions, &spec);

        info!(
            mission = self.mission_index,
            team = ?team,
            fails,
            passed,
            "mission resolved"
        );
        self.record.missions.push(MissionRecord {
            mission: self.mission_index,
            spec,
            team: team.clone(),
            fails,
            passed,
            vote_limit_reached: false,
        });
        self.emit(EventKind::MissionResolved {
            team,
            fails,
            passed,
            vote_limit_reached: false,
        });
        Phase::RecalibratePostMission
    }

    fn recalibrate_post_mission(&mut self) -> Phase {
        let passed = self.record.missions.last().map_or(false, |m| m.passed);
        recalibrate_all(
            &mut self.agents,
            self.current_leader,
            Recalibration::PostMission {
                passed,
                team: &self.vote_round.proposed_team,
            },
        );
        self.snapshot(Phase::RecalibratePostMission);
        self.rotate_leader();
        Phase::NextMission
    }

    fn fail_on_vote_limit(&mut self) -> Phase {
        let spec = self.current_spec();
        warn!(
            mission = self.mission_index,
            proposals = MAX_PROPOSALS,
            "every proposal rejected, mission fails"
        );
        self.record.missions.push(MissionRecord {
            mission: self.mission_index,
            spec,
            team: Vec::new(),
            fails: 0,
            passed: false,
            vote_limit_reached: true,
        });
        self.emit(EventKind::MissionResolved {
            team: Vec::new(),
            fails: 0,
            passed: false,
            vote_limit_reached: true,
        });
        Phase::NextMission
    }

    fn next_mission(&mut self) -> Phase {
        if self.mission_index + 1 >= self.missions.len() {
            self.finish();
            return Phase::GameEnd;
        }
        self.mission_index += 1;
        self.vote_round = VoteRound::default();
        Phase::Discussion1
    }

    fn finish(&mut self) {
        let outcome = GameOutcome::from_missions(&self.record.missions);
        info!(
            passed = outcome.missions_passed,
            failed = outcome.missions_failed,
            winner = %outcome.winner,
            "game over"
        );
        self.record.outcome = Some(outcome);
        self.emit(EventKind::GameEnded {
            missions_passed: outcome.missions_passed,
            missions_failed: outcome.missions_failed,
            winner: outcome.winner,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::BasicPolicy;
    use crate::systems::opinion::DiscussionMode;
    use rand::RngCore;
    use resistance_events::Faction;
    use std::collections::BTreeSet;

    #[derive(Clone, Copy)]
    enum Votes {
        Basic,
        Never,
        OnlyFinal,
    }

    #[derive(Clone, Copy)]
    enum Teams {
        Basic,
        Duplicate,
        Short,
    }

    /// Reference agent with scripted overrides
    struct Scripted {
        inner: BasicPolicy,
        votes: Votes,
        teams: Teams,
    }

    impl Scripted {
        fn boxed(votes: Votes, teams: Teams) -> Box<dyn AgentPolicy> {
            Box::new(Self {
                inner: BasicPolicy::default(),
                votes,
                teams,
            })
        }
    }

    impl AgentPolicy for Scripted {
        fn initialize(&mut self, faction: Faction, n: usize, id: AgentIndex, rng: &mut dyn RngCore) {
            self.inner.initialize(faction, n, id, rng)
        }
        fn set_known_spies(&mut self, spies: &[AgentIndex]) {
            self.inner.set_known_spies(spies)
        }
        fn id(&self) -> AgentIndex {
            self.inner.id()
        }
        fn faction(&self) -> Faction {
            self.inner.faction()
        }
        fn belief(&self) -> &[f64] {
            self.inner.belief()
        }
        fn fabricated_belief(&self) -> Option<&[f64]> {
            self.inner.fabricated_belief()
        }
        fn known_spies(&self) -> &BTreeSet<AgentIndex> {
            self.inner.known_spies()
        }
        fn perceived_opinion(&self, about: AgentIndex) -> f64 {
            self.inner.perceived_opinion(about)
        }
        fn absorb_opinion(&mut self, about: AgentIndex, speaker: AgentIndex, heard: f64) {
            self.inner.absorb_opinion(about, speaker, heard)
        }
        fn absorb_consensus(&mut self, disclosures: &[Vec<f64>]) {
            self.inner.absorb_consensus(disclosures)
        }
        fn select_team(&self, spec: &MissionSpec) -> Vec<AgentIndex> {
            let mut team = self.inner.select_team(spec);
            match self.teams {
                Teams::Basic => {}
                Teams::Duplicate => {
                    let first = team[0];
                    if let Some(last) = team.last_mut() {
                        *last = first;
                    }
                }
                Teams::Short => {
                    team.pop();
                }
            }
            team
        }
        fn vote_on_team(&self, team: &[AgentIndex], spec: &MissionSpec, is_final_round: bool) -> bool {
            match self.votes {
                Votes::Basic => self.inner.vote_on_team(team, spec, is_final_round),
                Votes::Never => false,
                Votes::OnlyFinal => is_final_round,
            }
        }
        fn execute_mission(&mut self) -> bool {
            self.inner.execute_mission()
        }
        fn recalibrate_opinion(&mut self, leader: AgentIndex, evidence: Recalibration<'_>) {
            self.inner.recalibrate_opinion(leader, evidence)
        }
    }

    fn config(players: usize, seed: u64) -> GameConfig {
        let mut config = GameConfig::default();
        config.game.player_count = players;
        config.game.seed = seed;
        config.opinion.mode = DiscussionMode::FixedRounds { rounds: 3 };
        config
    }

    fn scripted_game(players: usize, votes: Votes, teams: Teams) -> Moderator {
        let agents = (0..players).map(|_| Scripted::boxed(votes, teams)).collect();
        Moderator::new(config(players, 17), agents).unwrap()
    }

    #[test]
    fn test_vote_tally() {
        assert!(vote_passes(&[true, true, true, false, false]));
        assert!(!vote_passes(&[true, true, false, false, false]));
        // ties fail on even tables
        assert!(!vote_passes(&[true, true, true, false, false, false]));
    }

    #[test]
    fn test_mission_resolution() {
        let spec = MissionSpec::new(3, 1);
        assert_eq!(resolve_mission(&[true, false, true], &spec), (1, false));
        assert_eq!(resolve_mission(&[true, true, true], &spec), (0, true));

        let two_fail = MissionSpec::new(4, 2);
        assert_eq!(resolve_mission(&[true, false, true, true], &two_fail), (1, true));
    }

    #[test]
    fn test_validate_team() {
        let spec = MissionSpec::new(3, 1);
        assert!(validate_team(0, &[0, 1, 2], &spec, 5).is_ok());
        assert_eq!(
            validate_team(0, &[0, 1], &spec, 5),
            Err(InvariantViolation::TeamSizeMismatch {
                leader: 0,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            validate_team(1, &[0, 1, 1], &spec, 5),
            Err(InvariantViolation::DuplicateTeamMember { leader: 1, agent: 1 })
        );
        assert_eq!(
            validate_team(2, &[0, 1, 9], &spec, 5),
            Err(InvariantViolation::UnknownAgent { leader: 2, agent: 9 })
        );
    }

    #[test]
    fn test_setup_errors() {
        assert!(matches!(
            Moderator::with_basic_agents(config(4, 1)),
            Err(crate::error::GameError::Configuration(
                ConfigurationError::UnsupportedPlayerCount(4)
            ))
        ));

        let agents = basic_roster(5, 0.5);
        assert!(matches!(
            Moderator::new(config(6, 1), agents),
            Err(crate::error::GameError::Configuration(
                ConfigurationError::RosterSizeMismatch { expected: 6, actual: 5 }
            ))
        ));
    }

    #[test]
    fn test_phase_sequence_of_first_proposal() {
        let mut game = Moderator::with_basic_agents(config(5, 3)).unwrap();
        assert_eq!(game.phase(), Phase::Setup);

        let expected = [
            Phase::Discussion1,
            Phase::TeamSelect,
            Phase::RecalibrateTeamSel,
            Phase::Discussion2,
            Phase::Voting,
            Phase::RecalibrateVote,
        ];
        for phase in expected {
            assert_eq!(game.step().unwrap(), phase);
        }
        assert!(game.roles().is_some());
        assert_eq!(game.vote_round().votes.len(), 5);
        assert_eq!(game.vote_round().proposed_team.len(), 2);
    }

    #[test]
    fn test_full_game_reaches_end() {
        let mut game = Moderator::with_basic_agents(config(7, 5)).unwrap();
        let record = game.run().unwrap().clone();

        assert!(game.is_finished());
        assert_eq!(record.missions.len(), MISSIONS_PER_GAME);
        assert!(record.outcome.is_some());
        assert_eq!(record.spies.len(), 3);
        for (i, mission) in record.missions.iter().enumerate() {
            assert_eq!(mission.mission, i);
        }
        // stepping a finished game is a no-op
        assert_eq!(game.step().unwrap(), Phase::GameEnd);
    }

    #[test]
    fn test_invariants_hold_at_every_phase() {
        let mut game = Moderator::with_basic_agents(config(6, 8)).unwrap();
        game.step().unwrap();
        while !game.is_finished() {
            game.step().unwrap();
            for agent in game.agents() {
                assert_eq!(agent.belief()[agent.id()], agent.faction().indicator());
                assert!(agent.belief().iter().all(|b| (0.0..=1.0).contains(b)));
                if let Some(fake) = agent.fabricated_belief() {
                    assert!(fake.iter().all(|b| (0.0..=1.0).contains(b)));
                }
            }
        }
    }

    #[test]
    fn test_leader_rotates_after_each_proposal() {
        let mut game = Moderator::with_basic_agents(config(5, 12)).unwrap();
        let record = game.run().unwrap();

        // one step per proposal, across mission boundaries too
        for (i, leader) in record.leaders().into_iter().enumerate() {
            assert_eq!(leader, i % 5);
        }
    }

    #[test]
    fn test_final_round_forces_mission() {
        let mut game = scripted_game(5, Votes::OnlyFinal, Teams::Basic);
        let record = game.run().unwrap();

        assert_eq!(record.proposals.len(), MISSIONS_PER_GAME * MAX_PROPOSALS);
        for mission in &record.missions {
            assert!(!mission.vote_limit_reached);
            assert!(!mission.team.is_empty());
        }
        for proposal in &record.proposals {
            assert_eq!(proposal.passed, proposal.round == FINAL_ROUND);
        }
    }

    #[test]
    fn test_vote_limit_fails_mission() {
        let mut game = scripted_game(5, Votes::Never, Teams::Basic);
        let record = game.run().unwrap();

        assert_eq!(record.proposals.len(), MISSIONS_PER_GAME * MAX_PROPOSALS);
        assert!(record.missions.iter().all(|m| !m.passed && m.vote_limit_reached));
        let outcome = record.outcome.unwrap();
        assert_eq!(outcome.missions_failed, MISSIONS_PER_GAME);
        assert_eq!(outcome.winner, Faction::Spy);
    }

    #[test]
    fn test_broken_team_selection_is_fatal() {
        let mut game = scripted_game(5, Votes::Basic, Teams::Duplicate);
        let err = game.run().unwrap_err();
        assert!(matches!(
            err,
            crate::error::GameError::InvariantViolation(InvariantViolation::DuplicateTeamMember { .. })
        ));

        let mut game = scripted_game(5, Votes::Basic, Teams::Short);
        let err = game.run().unwrap_err();
        assert!(matches!(
            err,
            crate::error::GameError::InvariantViolation(InvariantViolation::TeamSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_events_are_sequenced() {
        let mut config = config(5, 30);
        config.game.record_snapshots = true;
        let mut game = Moderator::with_basic_agents(config).unwrap();
        game.run().unwrap();

        let events = game.drain_events();
        assert!(matches!(events.first().map(|e| &e.kind), Some(EventKind::GameStarted { .. })));
        assert!(matches!(events.last().map(|e| &e.kind), Some(EventKind::GameEnded { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, EventKind::BeliefsSnapshot(_))));
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.event_id, generate_event_id(i as u64 + 1));
        }
        assert!(game.events().is_empty());
    }
}
