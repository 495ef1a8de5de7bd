//! The game board: four towers and the shared action spaces.
//!
//! The board only records occupancy and the cards on display. Every rule
//! about who may stand where lives in the rules engine.

pub mod kind;
pub mod occupancy;
pub mod space;
pub mod tower;

pub use kind::{ActionScope, ActionType};
pub use occupancy::{Occupancy, Occupant};
pub use space::{ActionSpace, Capacity, SpaceId};
pub use tower::{Floor, Tower};

use serde::{Deserialize, Serialize};

use crate::cards::CardCategory;
use crate::resources::{ObtainableResourceSet, ResourceSet, ResourceType};

/// Floor values, bottom floor first.
const FLOOR_VALUES: [i32; 4] = [1, 3, 5, 7];

/// Value penalty of the large production and harvest areas.
const LARGE_AREA_PENALTY: i32 = 3;

/// Towers and action spaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// One tower per category, in category order.
    pub towers: Vec<Tower>,
    pub spaces: Vec<ActionSpace>,
}

impl Board {
    /// Create a board from prepared towers and spaces.
    #[must_use]
    pub fn new(towers: Vec<Tower>, spaces: Vec<ActionSpace>) -> Self {
        Self { towers, spaces }
    }

    /// The standard board.
    ///
    /// Upper floors give 1 and 2 of the tower's resource (wood, stone,
    /// military points, gold). The last two market slots need four players;
    /// the large production and harvest areas need three.
    #[must_use]
    pub fn standard() -> Self {
        let towers = CardCategory::ALL
            .iter()
            .map(|&category| {
                let resource = match category {
                    CardCategory::Territory => ResourceType::Wood,
                    CardCategory::Character => ResourceType::Stone,
                    CardCategory::Building => ResourceType::MilitaryPoints,
                    CardCategory::Venture => ResourceType::Gold,
                };
                let floors = FLOOR_VALUES
                    .iter()
                    .enumerate()
                    .map(|(i, &value)| {
                        let bonus = match i {
                            2 => ResourceSet::new().with(resource, 1),
                            3 => ResourceSet::new().with(resource, 2),
                            _ => ResourceSet::new(),
                        };
                        Floor::new(value, bonus)
                    })
                    .collect();
                Tower::new(category, floors)
            })
            .collect();

        let spaces = vec![
            ActionSpace::new(SpaceId::Market(0), ResourceSet::new().with(ResourceType::Gold, 5)),
            ActionSpace::new(SpaceId::Market(1), ResourceSet::new().with(ResourceType::Servants, 5)),
            ActionSpace::new(
                SpaceId::Market(2),
                ResourceSet::new()
                    .with(ResourceType::MilitaryPoints, 3)
                    .with(ResourceType::Gold, 2),
            )
            .with_min_players(4),
            ActionSpace::new(
                SpaceId::Market(3),
                ObtainableResourceSet::new().with(ResourceType::CouncilPrivilege, 2),
            )
            .with_min_players(4),
            ActionSpace::new(SpaceId::SmallProduction, ResourceSet::new()),
            ActionSpace::new(SpaceId::LargeProduction, ResourceSet::new())
                .unlimited()
                .with_penalty(LARGE_AREA_PENALTY)
                .with_min_players(3),
            ActionSpace::new(SpaceId::SmallHarvest, ResourceSet::new()),
            ActionSpace::new(SpaceId::LargeHarvest, ResourceSet::new())
                .unlimited()
                .with_penalty(LARGE_AREA_PENALTY)
                .with_min_players(3),
            ActionSpace::new(
                SpaceId::CouncilPalace,
                ObtainableResourceSet::new()
                    .with(ResourceType::Gold, 1)
                    .with(ResourceType::CouncilPrivilege, 1),
            )
            .unlimited(),
        ];

        Self::new(towers, spaces)
    }

    /// Enable or disable spaces for the number of players in the game.
    pub fn enable_for(&mut self, players: usize) {
        for space in &mut self.spaces {
            space.enabled = players >= space.min_players;
        }
    }

    #[must_use]
    pub fn tower(&self, category: CardCategory) -> Option<&Tower> {
        self.towers.iter().find(|t| t.category == category)
    }

    pub fn tower_mut(&mut self, category: CardCategory) -> Option<&mut Tower> {
        self.towers.iter_mut().find(|t| t.category == category)
    }

    #[must_use]
    pub fn floor(&self, category: CardCategory, index: usize) -> Option<&Floor> {
        self.tower(category).and_then(|t| t.floor(index))
    }

    #[must_use]
    pub fn space(&self, id: SpaceId) -> Option<&ActionSpace> {
        self.spaces.iter().find(|s| s.id == id)
    }

    pub fn space_mut(&mut self, id: SpaceId) -> Option<&mut ActionSpace> {
        self.spaces.iter_mut().find(|s| s.id == id)
    }

    /// True if `player` has a colored member anywhere in the area of `action`.
    ///
    /// An area is a whole tower, both production spaces, both harvest spaces,
    /// or the council palace. The market has no area rule.
    #[must_use]
    pub fn area_has_colored_member_of(&self, action: ActionType, player: &str) -> bool {
        match action {
            ActionType::Tower(category) => self
                .tower(category)
                .is_some_and(|t| t.has_colored_member_of(player)),
            ActionType::Market => false,
            _ => self
                .spaces
                .iter()
                .filter(|s| s.action_type() == action)
                .any(|s| s.occupancy.has_colored_member_of(player)),
        }
    }

    /// Usernames on the council palace in placement order, without repeats.
    #[must_use]
    pub fn council_order(&self) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        if let Some(council) = self.space(SpaceId::CouncilPalace) {
            for occupant in council.occupancy.iter() {
                if !order.contains(&occupant.player) {
                    order.push(occupant.player.clone());
                }
            }
        }
        order
    }

    /// Remove every family member from the board.
    pub fn clear_occupancy(&mut self) {
        for tower in &mut self.towers {
            tower.clear_occupancy();
        }
        for space in &mut self.spaces {
            space.occupancy.clear();
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
