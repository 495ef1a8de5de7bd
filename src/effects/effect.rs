//! Effect definitions.
//!
//! Effects are small rule modifiers attached to development cards, played
//! leader cards and excommunication tiles. They are never registered with
//! the engine: the engine scans a player's active cards and asks each effect
//! whether it answers the capability it is computing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::fold::Ratio;
use crate::board::{ActionScope, ActionType};
use crate::cards::CardCategory;
use crate::core::FamilyColor;
use crate::resources::{ObtainableResourceSet, ResourceMultiplier, ResourceSet, ResourceType};

/// Resources paid and received by one production or harvest option.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub cost: ResourceSet,
    pub gain: ObtainableResourceSet,
}

impl Conversion {
    /// A free yield.
    #[must_use]
    pub fn free(gain: ObtainableResourceSet) -> Self {
        Self {
            cost: ResourceSet::new(),
            gain,
        }
    }

    /// Pay `cost` to receive `gain`.
    #[must_use]
    pub fn exchange(cost: ResourceSet, gain: ObtainableResourceSet) -> Self {
        Self { cost, gain }
    }
}

/// A rule modifier.
///
/// ## Value effects
///
/// Folded over a base value: setters replace it, modifiers add to it,
/// multipliers scale it last.
///
/// ## Gates and bypasses
///
/// Switch an occupancy, cost or military check off, or forbid a space.
///
/// ## Grants
///
/// Resources received immediately, on activation, or at the end of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Resources received when the card is taken.
    ImmediateResources(ObtainableResourceSet),

    /// Add `delta` to the value of matching actions.
    ActionValueModifier { scope: ActionScope, delta: i32 },

    /// Matching actions are performed with this value.
    ActionValueSetter { scope: ActionScope, value: i32 },

    /// Add `delta` to the listed family members.
    FamilyValueModifier {
        colors: SmallVec<[FamilyColor; 3]>,
        delta: i32,
    },

    /// The listed family members are worth `value`.
    FamilyValueSetter {
        colors: SmallVec<[FamilyColor; 3]>,
        value: i32,
    },

    /// Scale the value servants add to an action.
    ServantValueMultiplier(Ratio),

    /// Add `delta` to every gain of `resource`.
    ResourceGainModifier { resource: ResourceType, delta: i32 },

    /// Lower the cost of cards of a category (`None` = every category).
    CostDiscount {
        category: Option<CardCategory>,
        discount: ResourceSet,
    },

    /// Occupied single spaces and floors may be entered.
    OccupationCheckBypass,

    /// No extra cost for entering an occupied tower.
    DoubleOccupationCostBypass,

    /// Territory cards can be taken without military points.
    MilitaryRequirementBypass,

    /// Floor bonuses of matching towers are replaced by `bonus`.
    FloorBonusOverride { scope: ActionScope, bonus: ResourceSet },

    /// Resources received at the end of the game.
    EndOfGameResources(ObtainableResourceSet),

    /// Resources lost at the end of the game, once per satisfaction.
    EndOfGamePenalty(ResourceMultiplier),

    /// No end-game points from cards of this category.
    IgnoreFinalScore(CardCategory),

    /// Family members cannot be placed on matching spaces.
    InhibitSpace(ActionScope),

    /// Production or harvest yield of a card, available from `min_value`.
    Activation {
        action: ActionType,
        min_value: i32,
        conversions: Vec<Conversion>,
    },
}

impl Effect {
    /// Immediate resource grant.
    pub fn grant(resources: impl Into<ObtainableResourceSet>) -> Self {
        Self::ImmediateResources(resources.into())
    }

    /// Action value bonus or malus.
    pub fn action_modifier(scope: impl Into<ActionScope>, delta: i32) -> Self {
        Self::ActionValueModifier {
            scope: scope.into(),
            delta,
        }
    }

    /// Fixed action value.
    pub fn action_setter(scope: impl Into<ActionScope>, value: i32) -> Self {
        Self::ActionValueSetter {
            scope: scope.into(),
            value,
        }
    }

    /// Family member value bonus or malus.
    pub fn family_modifier(colors: &[FamilyColor], delta: i32) -> Self {
        Self::FamilyValueModifier {
            colors: SmallVec::from_slice(colors),
            delta,
        }
    }

    /// Fixed family member value.
    pub fn family_setter(colors: &[FamilyColor], value: i32) -> Self {
        Self::FamilyValueSetter {
            colors: SmallVec::from_slice(colors),
            value,
        }
    }

    /// Servants are worth `numerator / denominator` each.
    pub fn servant_multiplier(numerator: u32, denominator: u32) -> Self {
        Self::ServantValueMultiplier(Ratio::new(numerator, denominator))
    }

    /// Every gain of `resource` changes by `delta`.
    pub fn gain_modifier(resource: ResourceType, delta: i32) -> Self {
        Self::ResourceGainModifier { resource, delta }
    }

    /// Cheaper cards of a category.
    pub fn cost_discount(category: Option<CardCategory>, discount: ResourceSet) -> Self {
        Self::CostDiscount { category, discount }
    }

    /// A free production or harvest yield.
    pub fn activation(action: ActionType, min_value: i32, gain: impl Into<ObtainableResourceSet>) -> Self {
        Self::Activation {
            action,
            min_value,
            conversions: vec![Conversion::free(gain.into())],
        }
    }

    /// A production or harvest with alternative conversions.
    pub fn activation_with(action: ActionType, min_value: i32, conversions: Vec<Conversion>) -> Self {
        Self::Activation {
            action,
            min_value,
            conversions,
        }
    }

    /// End-game grant.
    pub fn end_of_game(resources: impl Into<ObtainableResourceSet>) -> Self {
        Self::EndOfGameResources(resources.into())
    }
}
