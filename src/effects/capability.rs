//! Capability queries.
//!
//! Each effect variant answers exactly one capability. The engine asks an
//! effect for the answer it needs; non-matching variants return `None`/`false`.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::fold::Ratio;
use crate::board::ActionType;
use crate::cards::CardCategory;
use crate::core::FamilyColor;
use crate::resources::{ResourceSet, ResourceType};

/// Narrow rule-modifying interfaces an effect can implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    ImmediateGrant,
    ValueSetter,
    ValueModifier,
    ValueMultiplier,
    GainModifier,
    CostModifier,
    Bypass(Bypass),
    FloorBonusOverride,
    EndOfGame,
    IgnoreFinalScore,
    InhibitSpace,
    Activation,
}

/// Checks an effect can switch off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bypass {
    OccupationCheck,
    DoubleOccupationCost,
    MilitaryRequirement,
}

/// A quantity folded through value effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueTarget {
    FamilyMember(FamilyColor),
    Action(ActionType),
    Servants,
}

impl std::fmt::Display for ValueTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueTarget::FamilyMember(color) => write!(f, "the {color} family member"),
            ValueTarget::Action(action) => write!(f, "{action} actions"),
            ValueTarget::Servants => f.write_str("servants"),
        }
    }
}

impl Effect {
    /// The capability this effect implements.
    #[must_use]
    pub fn capability(&self) -> Capability {
        match self {
            Effect::ImmediateResources(_) => Capability::ImmediateGrant,
            Effect::ActionValueSetter { .. } | Effect::FamilyValueSetter { .. } => Capability::ValueSetter,
            Effect::ActionValueModifier { .. } | Effect::FamilyValueModifier { .. } => {
                Capability::ValueModifier
            }
            Effect::ServantValueMultiplier(_) => Capability::ValueMultiplier,
            Effect::ResourceGainModifier { .. } => Capability::GainModifier,
            Effect::CostDiscount { .. } => Capability::CostModifier,
            Effect::OccupationCheckBypass => Capability::Bypass(Bypass::OccupationCheck),
            Effect::DoubleOccupationCostBypass => Capability::Bypass(Bypass::DoubleOccupationCost),
            Effect::MilitaryRequirementBypass => Capability::Bypass(Bypass::MilitaryRequirement),
            Effect::FloorBonusOverride { .. } => Capability::FloorBonusOverride,
            Effect::EndOfGameResources(_) | Effect::EndOfGamePenalty(_) => Capability::EndOfGame,
            Effect::IgnoreFinalScore(_) => Capability::IgnoreFinalScore,
            Effect::InhibitSpace(_) => Capability::InhibitSpace,
            Effect::Activation { .. } => Capability::Activation,
        }
    }

    /// True if this effect implements `capability`.
    #[must_use]
    pub fn implements(&self, capability: Capability) -> bool {
        self.capability() == capability
    }

    /// Value this effect forces on `target`, if it is a matching setter.
    #[must_use]
    pub fn setter_for(&self, target: ValueTarget) -> Option<i32> {
        match (self, target) {
            (Effect::FamilyValueSetter { colors, value }, ValueTarget::FamilyMember(color))
                if colors.contains(&color) =>
            {
                Some(*value)
            }
            (Effect::ActionValueSetter { scope, value }, ValueTarget::Action(action))
                if scope.matches(action) =>
            {
                Some(*value)
            }
            _ => None,
        }
    }

    /// Delta this effect adds to `target`, if it is a matching modifier.
    #[must_use]
    pub fn modifier_for(&self, target: ValueTarget) -> Option<i32> {
        match (self, target) {
            (Effect::FamilyValueModifier { colors, delta }, ValueTarget::FamilyMember(color))
                if colors.contains(&color) =>
            {
                Some(*delta)
            }
            (Effect::ActionValueModifier { scope, delta }, ValueTarget::Action(action))
                if scope.matches(action) =>
            {
                Some(*delta)
            }
            _ => None,
        }
    }

    /// Factor this effect scales `target` by, if it is a matching multiplier.
    #[must_use]
    pub fn multiplier_for(&self, target: ValueTarget) -> Option<Ratio> {
        match (self, target) {
            (Effect::ServantValueMultiplier(ratio), ValueTarget::Servants) => Some(*ratio),
            _ => None,
        }
    }

    /// Delta applied to every gain of `resource`.
    #[must_use]
    pub fn gain_modifier_for(&self, resource: ResourceType) -> Option<i32> {
        match self {
            Effect::ResourceGainModifier { resource: r, delta } if *r == resource => Some(*delta),
            _ => None,
        }
    }

    /// Discount on cards of `category`.
    #[must_use]
    pub fn cost_discount_for(&self, category: CardCategory) -> Option<&ResourceSet> {
        match self {
            Effect::CostDiscount { category: c, discount } if c.is_none_or(|c| c == category) => {
                Some(discount)
            }
            _ => None,
        }
    }

    /// Replacement floor bonus for towers of `action`.
    #[must_use]
    pub fn floor_bonus_for(&self, action: ActionType) -> Option<&ResourceSet> {
        match self {
            Effect::FloorBonusOverride { scope, bonus } if scope.matches(action) => Some(bonus),
            _ => None,
        }
    }

    /// True if this effect forbids placing on spaces of `action`.
    #[must_use]
    pub fn inhibits(&self, action: ActionType) -> bool {
        matches!(self, Effect::InhibitSpace(scope) if scope.matches(action))
    }

    /// True if this effect cancels end-game points of `category`.
    #[must_use]
    pub fn ignores_final_score(&self, category: CardCategory) -> bool {
        matches!(self, Effect::IgnoreFinalScore(c) if *c == category)
    }
}
