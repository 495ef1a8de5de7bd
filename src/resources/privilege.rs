//! Council privileges: choices among a game-wide list of alternatives.

use serde::{Deserialize, Serialize};

use super::resource::{ResourceSet, ResourceType};
use crate::core::{ActionError, ActionResult};

/// The alternatives a council privilege can be exchanged for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilPrivileges {
    options: Vec<ResourceSet>,
}

impl CouncilPrivileges {
    /// Create a privilege list.
    #[must_use]
    pub fn new(options: Vec<ResourceSet>) -> Self {
        Self { options }
    }

    /// The standard five alternatives.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            ResourceSet::new().with(ResourceType::Wood, 1).with(ResourceType::Stone, 1),
            ResourceSet::new().with(ResourceType::Servants, 2),
            ResourceSet::new().with(ResourceType::Gold, 2),
            ResourceSet::new().with(ResourceType::MilitaryPoints, 2),
            ResourceSet::new().with(ResourceType::FaithPoints, 1),
        ])
    }

    /// The allowed alternatives.
    #[must_use]
    pub fn options(&self) -> &[ResourceSet] {
        &self.options
    }

    /// True if no alternative is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Check a player's choices for `granted` privileges and total them.
    ///
    /// Exactly one choice per privilege; every choice must be an allowed
    /// alternative; choices for the same grant must differ while there are
    /// enough alternatives to make that possible.
    pub fn resolve(&self, granted: u32, chosen: &[ResourceSet]) -> ActionResult<ResourceSet> {
        if chosen.len() != granted as usize {
            return Err(ActionError::not_allowed(format!(
                "expected {granted} council privilege choice(s), got {}",
                chosen.len()
            )));
        }

        let mut total = ResourceSet::new();
        for (i, choice) in chosen.iter().enumerate() {
            if !self.options.contains(choice) {
                return Err(ActionError::not_allowed(format!(
                    "{choice} is not a council privilege option"
                )));
            }
            if granted as usize <= self.options.len() && chosen[..i].contains(choice) {
                return Err(ActionError::not_allowed(
                    "council privileges from the same grant must be different",
                ));
            }
            total.add_set(choice);
        }
        Ok(total)
    }
}
