//! Mission Rules
//!
//! Team sizes and failure thresholds for each player count.

use crate::error::ConfigurationError;
use resistance_events::MissionSpec;

/// Number of missions in a game
pub const MISSIONS_PER_GAME: usize = 5;

/// Smallest supported table
pub const MIN_PLAYERS: usize = 5;

/// Largest supported table
pub const MAX_PLAYERS: usize = 10;

const FIVE: [MissionSpec; MISSIONS_PER_GAME] = [
    MissionSpec::new(2, 1),
    MissionSpec::new(3, 1),
    MissionSpec::new(2, 1),
    MissionSpec::new(3, 1),
    MissionSpec::new(3, 1),
];

const SIX: [MissionSpec; MISSIONS_PER_GAME] = [
    MissionSpec::new(2, 1),
    MissionSpec::new(3, 1),
    MissionSpec::new(4, 1),
    MissionSpec::new(3, 1),
    MissionSpec::new(4, 1),
];

const SEVEN: [MissionSpec; MISSIONS_PER_GAME] = [
    MissionSpec::new(2, 1),
    MissionSpec::new(3, 1),
    MissionSpec::new(3, 1),
    MissionSpec::new(4, 2),
    MissionSpec::new(4, 1),
];

const EIGHT_TO_TEN: [MissionSpec; MISSIONS_PER_GAME] = [
    MissionSpec::new(3, 1),
    MissionSpec::new(4, 1),
    MissionSpec::new(4, 1),
    MissionSpec::new(5, 2),
    MissionSpec::new(5, 1),
];

/// Static lookup of mission specs by player count
pub struct MissionRuleTable;

impl MissionRuleTable {
    /// Returns the five missions played at a table of `player_count`.
    pub fn specs_for(
        player_count: usize,
    ) -> Result<[MissionSpec; MISSIONS_PER_GAME], ConfigurationError> {
        match player_count {
            5 => Ok(FIVE),
            6 => Ok(SIX),
            7 => Ok(SEVEN),
            8..=10 => Ok(EIGHT_TO_TEN),
            other => Err(ConfigurationError::UnsupportedPlayerCount(other)),
        }
    }

    /// Number of spies at a table of `player_count`.
    pub fn spy_count(player_count: usize) -> usize {
        1 + player_count.saturating_sub(1) / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(specs: &[MissionSpec]) -> Vec<(usize, usize)> {
        specs.iter().map(|s| (s.team_size, s.fail_threshold)).collect()
    }

    #[test]
    fn test_seven_players() {
        let specs = MissionRuleTable::specs_for(7).unwrap();
        assert_eq!(pairs(&specs), vec![(2, 1), (3, 1), (3, 1), (4, 2), (4, 1)]);
    }

    #[test]
    fn test_five_and_six_players() {
        assert_eq!(
            pairs(&MissionRuleTable::specs_for(5).unwrap()),
            vec![(2, 1), (3, 1), (2, 1), (3, 1), (3, 1)]
        );
        assert_eq!(
            pairs(&MissionRuleTable::specs_for(6).unwrap()),
            vec![(2, 1), (3, 1), (4, 1), (3, 1), (4, 1)]
        );
    }

    #[test]
    fn test_large_tables_share_rules() {
        let eight = MissionRuleTable::specs_for(8).unwrap();
        assert_eq!(eight, MissionRuleTable::specs_for(9).unwrap());
        assert_eq!(eight, MissionRuleTable::specs_for(10).unwrap());
        assert_eq!(pairs(&eight), vec![(3, 1), (4, 1), (4, 1), (5, 2), (5, 1)]);
    }

    #[test]
    fn test_unsupported_counts() {
        for count in [0, 4, 11, 20] {
            assert!(matches!(
                MissionRuleTable::specs_for(count),
                Err(ConfigurationError::UnsupportedPlayerCount(c)) if c == count
            ));
        }
    }

    #[test]
    fn test_spy_count() {
        let expected = [(5, 2), (6, 2), (7, 3), (8, 3), (9, 3), (10, 4)];
        for (players, spies) in expected {
            assert_eq!(MissionRuleTable::spy_count(players), spies);
        }
    }

    #[test]
    fn test_team_never_exceeds_table() {
        for players in MIN_PLAYERS..=MAX_PLAYERS {
            for spec in MissionRuleTable::specs_for(players).unwrap() {
                assert!(spec.team_size <= players);
                assert!(spec.fail_threshold <= spec.team_size);
            }
        }
    }
}
