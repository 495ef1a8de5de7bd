//! Development cards and their cost alternatives.

use serde::{Deserialize, Serialize};

use super::category::CardCategory;
use crate::board::ActionType;
use crate::effects::{Conversion, Effect};
use crate::resources::{ObtainableResourceSet, RequiredResourceSet, ResourceSet, ResourceType};

/// One way of paying for a card.
///
/// `requirement` must be held; `payment` is deducted. For most cards the two
/// are the same amounts. Some ventures instead ask the player to hold more
/// military points than they spend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAlternative {
    pub requirement: RequiredResourceSet,
    pub payment: ResourceSet,
}

impl CostAlternative {
    /// Hold and pay `payment`.
    #[must_use]
    pub fn pay(payment: ResourceSet) -> Self {
        Self {
            requirement: RequiredResourceSet::from_resources(&payment),
            payment,
        }
    }

    /// Hold `required` military points and spend `spent` of them.
    #[must_use]
    pub fn military(required: i32, spent: i32) -> Self {
        Self {
            requirement: RequiredResourceSet::new().resource(ResourceType::MilitaryPoints, required),
            payment: ResourceSet::new().with(ResourceType::MilitaryPoints, spent),
        }
    }

    /// This alternative after a discount. Neither side drops below zero.
    #[must_use]
    pub fn discounted(&self, discount: &ResourceSet) -> Self {
        Self {
            requirement: self.requirement.discounted(discount),
            payment: self.payment.saturating_sub(discount),
        }
    }
}

/// A card sitting on a tower floor or owned by a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentCard {
    /// Unique card name.
    pub name: String,
    pub category: CardCategory,
    /// Period (1-3) the card is drawn in.
    pub period: u8,
    /// Alternatives the player picks one of. Empty means free.
    pub costs: Vec<CostAlternative>,
    /// Effects in attachment order.
    pub effects: Vec<Effect>,
}

impl DevelopmentCard {
    /// Create a free card with no effects.
    pub fn new(name: impl Into<String>, category: CardCategory, period: u8) -> Self {
        Self {
            name: name.into(),
            category,
            period,
            costs: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Add a cost alternative (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: CostAlternative) -> Self {
        self.costs.push(cost);
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Cost alternatives, with the free alternative standing in for none.
    #[must_use]
    pub fn cost_alternatives(&self) -> Vec<CostAlternative> {
        if self.costs.is_empty() {
            vec![CostAlternative::default()]
        } else {
            self.costs.clone()
        }
    }

    /// Grants received when the card is taken.
    pub fn immediate_grants(&self) -> impl Iterator<Item = &ObtainableResourceSet> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::ImmediateResources(grant) => Some(grant),
            _ => None,
        })
    }

    /// Production or harvest activation of this card, if it has one for `action`.
    #[must_use]
    pub fn activation(&self, action: ActionType) -> Option<(i32, &[Conversion])> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Activation {
                action: a,
                min_value,
                conversions,
            } if *a == action => Some((*min_value, conversions.as_slice())),
            _ => None,
        })
    }
}
