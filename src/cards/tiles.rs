//! Excommunication tiles and personal bonus tiles.

use serde::{Deserialize, Serialize};

use crate::board::ActionType;
use crate::effects::Effect;
use crate::resources::ResourceSet;

/// Penalty tile handed out at a Vatican report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcommunicationTile {
    pub id: u32,
    /// Period (1-3) whose report hands out this tile.
    pub period: u8,
    pub effects: Vec<Effect>,
}

impl ExcommunicationTile {
    #[must_use]
    pub fn new(id: u32, period: u8) -> Self {
        Self {
            id,
            period,
            effects: Vec::new(),
        }
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Drafted once per game; yields resources on every production or harvest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalBonusTile {
    pub id: u32,
    pub production: ResourceSet,
    pub harvest: ResourceSet,
}

impl PersonalBonusTile {
    #[must_use]
    pub fn new(id: u32, production: ResourceSet, harvest: ResourceSet) -> Self {
        Self {
            id,
            production,
            harvest,
        }
    }

    /// Yield for entering a production or harvest space.
    #[must_use]
    pub fn yield_for(&self, action: ActionType) -> Option<&ResourceSet> {
        match action {
            ActionType::Production => Some(&self.production),
            ActionType::Harvest => Some(&self.harvest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceType;

    #[test]
    fn test_bonus_tile_yield() {
        let tile = PersonalBonusTile::new(
            1,
            ResourceSet::new().with(ResourceType::Gold, 2),
            ResourceSet::new().with(ResourceType::Wood, 1),
        );
        assert_eq!(tile.yield_for(ActionType::Production).unwrap().get(ResourceType::Gold), 2);
        assert_eq!(tile.yield_for(ActionType::Harvest).unwrap().get(ResourceType::Wood), 1);
        assert!(tile.yield_for(ActionType::Market).is_none());
    }
}
