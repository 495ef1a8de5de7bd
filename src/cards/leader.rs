//! Leader cards.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::resources::{ObtainableResourceSet, RequiredResourceSet};

/// A leader card in hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderCard {
    pub name: String,
    /// What the player must hold (or own) to play the card.
    pub requirement: RequiredResourceSet,
    /// Permanent effects once played.
    pub effects: Vec<Effect>,
    /// Bonus that can be fired once per round once played.
    pub once_per_round: Option<ObtainableResourceSet>,
}

impl LeaderCard {
    /// Create a leader with no requirement and no effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: RequiredResourceSet::new(),
            effects: Vec::new(),
            once_per_round: None,
        }
    }

    /// Set the play requirement (builder pattern).
    #[must_use]
    pub fn with_requirement(mut self, requirement: RequiredResourceSet) -> Self {
        self.requirement = requirement;
        self
    }

    /// Add a permanent effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the once-per-round bonus (builder pattern).
    #[must_use]
    pub fn with_once_per_round(mut self, bonus: impl Into<ObtainableResourceSet>) -> Self {
        self.once_per_round = Some(bonus.into());
        self
    }
}

/// A leader card on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedLeader {
    pub card: LeaderCard,
    /// Round in which the once-per-round bonus was last fired.
    pub last_activated_round: Option<u8>,
}

impl PlayedLeader {
    #[must_use]
    pub fn new(card: LeaderCard) -> Self {
        Self {
            card,
            last_activated_round: None,
        }
    }

    /// True if the once-per-round bonus is still available in `round`.
    #[must_use]
    pub fn can_activate(&self, round: u8) -> bool {
        self.card.once_per_round.is_some() && self.last_activated_round != Some(round)
    }

    pub fn mark_activated(&mut self, round: u8) {
        self.last_activated_round = Some(round);
    }
}
