//! Shared action spaces: market, production, harvest and council palace.

use serde::{Deserialize, Serialize};

use super::kind::ActionType;
use super::occupancy::{Occupancy, Occupant};
use crate::resources::ObtainableResourceSet;

/// Identifies a non-tower action space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceId {
    /// Market slot, numbered from 0.
    Market(u8),
    SmallProduction,
    LargeProduction,
    SmallHarvest,
    LargeHarvest,
    CouncilPalace,
}

impl SpaceId {
    /// The action performed on this space.
    #[must_use]
    pub const fn action_type(self) -> ActionType {
        match self {
            SpaceId::Market(_) => ActionType::Market,
            SpaceId::SmallProduction | SpaceId::LargeProduction => ActionType::Production,
            SpaceId::SmallHarvest | SpaceId::LargeHarvest => ActionType::Harvest,
            SpaceId::CouncilPalace => ActionType::CouncilPalace,
        }
    }
}

impl std::fmt::Display for SpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaceId::Market(slot) => write!(f, "market slot {slot}"),
            SpaceId::SmallProduction => f.write_str("small production area"),
            SpaceId::LargeProduction => f.write_str("large production area"),
            SpaceId::SmallHarvest => f.write_str("small harvest area"),
            SpaceId::LargeHarvest => f.write_str("large harvest area"),
            SpaceId::CouncilPalace => f.write_str("council palace"),
        }
    }
}

/// How many family members a space holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capacity {
    Single,
    Unlimited,
}

/// A shared action space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub id: SpaceId,
    /// Minimum action value to enter.
    pub required_value: i32,
    /// Received on entry.
    pub bonus: ObtainableResourceSet,
    pub capacity: Capacity,
    /// Subtracted from the action value performed here.
    pub value_penalty: i32,
    /// Players needed for the space to be enabled.
    pub min_players: usize,
    pub enabled: bool,
    pub occupancy: Occupancy,
}

impl ActionSpace {
    /// A single-slot space with value 1, open to any player count.
    pub fn new(id: SpaceId, bonus: impl Into<ObtainableResourceSet>) -> Self {
        Self {
            id,
            required_value: 1,
            bonus: bonus.into(),
            capacity: Capacity::Single,
            value_penalty: 0,
            min_players: 0,
            enabled: true,
            occupancy: Occupancy::new(),
        }
    }

    /// Allow any number of occupants (builder pattern).
    #[must_use]
    pub fn unlimited(mut self) -> Self {
        self.capacity = Capacity::Unlimited;
        self
    }

    /// Set the value penalty (builder pattern).
    #[must_use]
    pub fn with_penalty(mut self, penalty: i32) -> Self {
        self.value_penalty = penalty;
        self
    }

    /// Set the minimum player count (builder pattern).
    #[must_use]
    pub fn with_min_players(mut self, players: usize) -> Self {
        self.min_players = players;
        self
    }

    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.id.action_type()
    }

    /// True if no one else can enter without an occupation bypass.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity == Capacity::Single && !self.occupancy.is_empty()
    }

    pub fn occupy(&mut self, occupant: Occupant) {
        self.occupancy.push(occupant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FamilyColor;
    use crate::resources::{ResourceSet, ResourceType};

    #[test]
    fn test_single_space_fills() {
        let mut space = ActionSpace::new(SpaceId::Market(0), ResourceSet::new().with(ResourceType::Gold, 5));
        assert!(!space.is_full());
        space.occupy(Occupant::new("anna", FamilyColor::Black));
        assert!(space.is_full());
    }

    #[test]
    fn test_unlimited_never_full() {
        let mut space = ActionSpace::new(SpaceId::CouncilPalace, ResourceSet::new()).unlimited();
        space.occupy(Occupant::new("anna", FamilyColor::Black));
        space.occupy(Occupant::new("bruno", FamilyColor::White));
        assert!(!space.is_full());
    }

    #[test]
    fn test_action_types() {
        assert_eq!(SpaceId::LargeHarvest.action_type(), ActionType::Harvest);
        assert_eq!(SpaceId::Market(3).action_type(), ActionType::Market);
        assert_eq!(SpaceId::Market(2).to_string(), "market slot 2");
    }
}
