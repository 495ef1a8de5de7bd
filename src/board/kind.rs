//! Action types and the scopes effects use to target them.

use serde::{Deserialize, Serialize};

use crate::cards::CardCategory;

/// The kind of action a family member performs where it is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// A floor of the tower of this category.
    Tower(CardCategory),
    Production,
    Harvest,
    Market,
    CouncilPalace,
}

impl ActionType {
    /// True for tower floors.
    #[must_use]
    pub const fn is_tower(self) -> bool {
        matches!(self, ActionType::Tower(_))
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Tower(category) => write!(f, "{category} tower"),
            ActionType::Production => f.write_str("production"),
            ActionType::Harvest => f.write_str("harvest"),
            ActionType::Market => f.write_str("market"),
            ActionType::CouncilPalace => f.write_str("council palace"),
        }
    }
}

/// Which actions an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionScope {
    Any,
    AnyTower,
    Only(ActionType),
}

impl ActionScope {
    /// True if this scope covers `action`.
    #[must_use]
    pub fn matches(self, action: ActionType) -> bool {
        match self {
            ActionScope::Any => true,
            ActionScope::AnyTower => action.is_tower(),
            ActionScope::Only(only) => only == action,
        }
    }
}

impl From<ActionType> for ActionScope {
    fn from(action: ActionType) -> Self {
        ActionScope::Only(action)
    }
}
