//! Who stands on a floor or an action space.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::FamilyColor;

/// A family member on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    /// Username of the owner.
    pub player: String,
    pub color: FamilyColor,
}

impl Occupant {
    pub fn new(player: impl Into<String>, color: FamilyColor) -> Self {
        Self {
            player: player.into(),
            color,
        }
    }
}

/// Occupants of one location, in placement order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    occupants: SmallVec<[Occupant; 2]>,
}

impl Occupancy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, occupant: Occupant) {
        self.occupants.push(occupant);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.iter()
    }

    /// True if `player` has a colored (non-neutral) member here.
    #[must_use]
    pub fn has_colored_member_of(&self, player: &str) -> bool {
        self.occupants
            .iter()
            .any(|o| o.player == player && o.color.is_colored())
    }

    pub fn clear(&mut self) {
        self.occupants.clear();
    }
}
