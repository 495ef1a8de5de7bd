//! Towers and their floors.

use serde::{Deserialize, Serialize};

use super::occupancy::{Occupancy, Occupant};
use crate::cards::{CardCategory, DevelopmentCard};
use crate::resources::ResourceSet;

/// One of the four floors of a tower.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Minimum action value to enter.
    pub required_value: i32,
    /// Received on entry, before paying for the card.
    pub bonus: ResourceSet,
    /// The card on display. Gone once taken.
    pub card: Option<DevelopmentCard>,
    pub occupancy: Occupancy,
}

impl Floor {
    #[must_use]
    pub fn new(required_value: i32, bonus: ResourceSet) -> Self {
        Self {
            required_value,
            bonus,
            card: None,
            occupancy: Occupancy::new(),
        }
    }
}

/// A stack of floors holding cards of one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tower {
    pub category: CardCategory,
    /// Bottom floor first.
    pub floors: Vec<Floor>,
}

impl Tower {
    #[must_use]
    pub fn new(category: CardCategory, floors: Vec<Floor>) -> Self {
        Self { category, floors }
    }

    /// True if any floor holds a family member.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.floors.iter().any(|f| !f.occupancy.is_empty())
    }

    /// True if `player` already has a colored member on any floor.
    #[must_use]
    pub fn has_colored_member_of(&self, player: &str) -> bool {
        self.floors.iter().any(|f| f.occupancy.has_colored_member_of(player))
    }

    #[must_use]
    pub fn floor(&self, index: usize) -> Option<&Floor> {
        self.floors.get(index)
    }

    pub fn floor_mut(&mut self, index: usize) -> Option<&mut Floor> {
        self.floors.get_mut(index)
    }

    /// Deal new cards, bottom floor first. Floors left without a card stay empty.
    pub fn deal(&mut self, cards: Vec<DevelopmentCard>) {
        let mut cards = cards.into_iter();
        for floor in &mut self.floors {
            floor.card = cards.next();
        }
    }

    pub fn clear_occupancy(&mut self) {
        for floor in &mut self.floors {
            floor.occupancy.clear();
        }
    }

    pub fn occupy(&mut self, index: usize, occupant: Occupant) {
        if let Some(floor) = self.floors.get_mut(index) {
            floor.occupancy.push(occupant);
        }
    }
}
