//! Rule constants.
//!
//! `RulesConfig` gathers every number the rules engine consults: tables for
//! military gating and end-game scoring, Vatican report thresholds, starting
//! resources, and timing for room start. The defaults are the standard rules;
//! the external configuration loader may override any of them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resources::{ResourceSet, ResourceType};

/// Complete rule configuration for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Number of rounds (two per period).
    pub rounds: u8,

    /// Minimum players needed to start.
    pub min_players: usize,

    /// Maximum players in a room.
    pub max_players: usize,

    /// Turns each player takes per round (one per family member).
    pub turns_per_round: u32,

    /// Extra cost for entering a tower that already holds a family member.
    pub double_occupation_cost: ResourceSet,

    /// Maximum development cards a player may own per category.
    pub max_cards_per_category: usize,

    /// Military points required to take the next territory card,
    /// indexed by the number of territory cards already owned.
    pub territory_military: Vec<i32>,

    /// `(round, faith threshold)` for each Vatican report.
    pub vatican_thresholds: Vec<(u8, i32)>,

    /// Victory points awarded when a player gives up their faith points,
    /// indexed by faith points (capped at the last entry).
    pub faith_track: Vec<i32>,

    /// End-game victory points indexed by owned territory cards.
    pub territory_points: Vec<i32>,

    /// End-game victory points indexed by owned character cards.
    pub character_points: Vec<i32>,

    /// Bonus for the top military tier, then the next distinct tier.
    pub military_ranking_bonus: (i32, i32),

    /// Stored resources per end-game victory point.
    pub resources_per_victory_point: i32,

    /// Resources every player starts with (gold comes from `starting_gold`).
    pub starting_resources: ResourceSet,

    /// Starting gold indexed by seat in the initial turn order.
    pub starting_gold: Vec<i32>,

    /// Leader cards dealt to each player for the leader draft.
    pub leader_pack_size: usize,

    /// Delay between a room reaching the minimum player count and the game start.
    pub room_start_delay: Duration,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rounds: 6,
            min_players: 2,
            max_players: 4,
            turns_per_round: 4,
            double_occupation_cost: ResourceSet::new().with(ResourceType::Gold, 3),
            max_cards_per_category: 6,
            territory_military: vec![0, 0, 3, 7, 12, 18],
            vatican_thresholds: vec![(2, 3), (4, 4), (6, 5)],
            faith_track: vec![0, 1, 2, 3, 4, 5, 7, 9, 11, 13, 15, 17, 19, 22, 25, 30],
            territory_points: vec![0, 0, 0, 1, 4, 10, 20],
            character_points: vec![0, 1, 3, 6, 10, 15, 21],
            military_ranking_bonus: (5, 2),
            resources_per_victory_point: 5,
            starting_resources: ResourceSet::new()
                .with(ResourceType::Wood, 2)
                .with(ResourceType::Stone, 2)
                .with(ResourceType::Servants, 3),
            starting_gold: vec![5, 6, 7, 8],
            leader_pack_size: 4,
            room_start_delay: Duration::from_secs(30),
        }
    }
}

impl RulesConfig {
    /// Standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the double-occupation cost.
    #[must_use]
    pub fn with_double_occupation_cost(mut self, cost: ResourceSet) -> Self {
        self.double_occupation_cost = cost;
        self
    }

    /// Set the room start delay.
    #[must_use]
    pub fn with_room_start_delay(mut self, delay: Duration) -> Self {
        self.room_start_delay = delay;
        self
    }

    /// Set the leader draft pack size.
    #[must_use]
    pub fn with_leader_pack_size(mut self, size: usize) -> Self {
        self.leader_pack_size = size;
        self
    }

    /// Set the territory military table.
    #[must_use]
    pub fn with_territory_military(mut self, table: Vec<i32>) -> Self {
        self.territory_military = table;
        self
    }

    /// Military points needed to take another territory card when
    /// `owned` territory cards are already held.
    #[must_use]
    pub fn military_requirement(&self, owned: usize) -> i32 {
        lookup(&self.territory_military, owned)
    }

    /// Faith threshold for a Vatican report held at the end of `round`.
    ///
    /// `None` when no report is held after that round.
    #[must_use]
    pub fn vatican_threshold(&self, round: u8) -> Option<i32> {
        self.vatican_thresholds
            .iter()
            .find(|(r, _)| *r == round)
            .map(|(_, threshold)| *threshold)
    }

    /// Period (1-based) a round belongs to.
    #[must_use]
    pub fn period_of(&self, round: u8) -> u8 {
        round.saturating_add(1) / 2
    }

    /// Victory points for giving up `faith` faith points.
    #[must_use]
    pub fn faith_reward(&self, faith: i32) -> i32 {
        lookup(&self.faith_track, faith.max(0) as usize)
    }

    /// End-game points for `count` territory cards.
    #[must_use]
    pub fn territory_score(&self, count: usize) -> i32 {
        lookup(&self.territory_points, count)
    }

    /// End-game points for `count` character cards.
    #[must_use]
    pub fn character_score(&self, count: usize) -> i32 {
        lookup(&self.character_points, count)
    }

    /// Starting gold for a seat.
    #[must_use]
    pub fn starting_gold_for(&self, seat: usize) -> i32 {
        lookup(&self.starting_gold, seat)
    }
}

/// Table lookup that saturates at the last entry.
fn lookup(table: &[i32], index: usize) -> i32 {
    table
        .get(index)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_military_table() {
        let config = RulesConfig::default();
        assert_eq!(config.military_requirement(0), 0);
        assert_eq!(config.military_requirement(1), 0);
        assert_eq!(config.military_requirement(2), 3);
        assert_eq!(config.military_requirement(3), 7);
        assert_eq!(config.military_requirement(4), 12);
        assert_eq!(config.military_requirement(5), 18);
    }

    #[test]
    fn test_vatican_thresholds() {
        let config = RulesConfig::default();
        assert_eq!(config.vatican_threshold(1), None);
        assert_eq!(config.vatican_threshold(2), Some(3));
        assert_eq!(config.vatican_threshold(4), Some(4));
        assert_eq!(config.vatican_threshold(6), Some(5));
    }

    #[test]
    fn test_periods() {
        let config = RulesConfig::default();
        assert_eq!(config.period_of(1), 1);
        assert_eq!(config.period_of(2), 1);
        assert_eq!(config.period_of(3), 2);
        assert_eq!(config.period_of(6), 3);
    }

    #[test]
    fn test_score_tables() {
        let config = RulesConfig::default();
        assert_eq!(config.territory_score(2), 0);
        assert_eq!(config.territory_score(4), 4);
        assert_eq!(config.territory_score(6), 20);
        assert_eq!(config.character_score(3), 6);
        assert_eq!(config.character_score(6), 21);
    }

    #[test]
    fn test_lookup_saturates() {
        let config = RulesConfig::default();
        assert_eq!(config.faith_reward(40), 30);
        assert_eq!(config.faith_reward(-1), 0);
        assert_eq!(config.starting_gold_for(9), 8);
    }

    #[test]
    fn test_builder() {
        let config = RulesConfig::new()
            .with_double_occupation_cost(ResourceSet::new().with(ResourceType::Gold, 1))
            .with_room_start_delay(Duration::from_secs(5));

        assert_eq!(config.double_occupation_cost.get(ResourceType::Gold), 1);
        assert_eq!(config.room_start_delay, Duration::from_secs(5));
    }
}
