//! Resources a player will receive, including multipliers and privileges.

use serde::{Deserialize, Serialize};

use super::required::{RequiredResourceSet, RequirementSource};
use super::resource::{ResourceSet, ResourceType};

/// "For every time you satisfy `requirement`, receive `bonus` once."
///
/// The bonus is a plain [`ResourceSet`], so a multiplier can never pay out
/// another multiplier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMultiplier {
    pub requirement: RequiredResourceSet,
    pub bonus: ResourceSet,
}

impl ResourceMultiplier {
    /// Create a multiplier.
    #[must_use]
    pub fn new(requirement: RequiredResourceSet, bonus: ResourceSet) -> Self {
        Self { requirement, bonus }
    }

    /// Times this multiplier fires for `source`.
    #[must_use]
    pub fn times<S: RequirementSource + ?Sized>(&self, source: &S) -> u32 {
        self.requirement.satisfaction_count(source)
    }

    /// Total payout for `source`.
    #[must_use]
    pub fn resolve<S: RequirementSource + ?Sized>(&self, source: &S) -> ResourceSet {
        self.bonus.scaled(self.times(source) as i32)
    }
}

/// What a card, space or effect grants before it is resolved for a player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObtainableResourceSet {
    /// Fixed amounts.
    pub resources: ResourceSet,
    /// Number of council privileges to choose.
    pub council_privileges: u32,
    /// Amounts that depend on the receiving player.
    pub multipliers: Vec<ResourceMultiplier>,
}

impl ObtainableResourceSet {
    /// Create an empty grant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount (builder pattern). Privileges are counted, not stored.
    #[must_use]
    pub fn with(mut self, resource: ResourceType, quantity: i32) -> Self {
        self.add(resource, quantity);
        self
    }

    /// Add a multiplier (builder pattern).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: ResourceMultiplier) -> Self {
        self.multipliers.push(multiplier);
        self
    }

    /// Add an amount.
    pub fn add(&mut self, resource: ResourceType, quantity: i32) {
        if resource == ResourceType::CouncilPrivilege {
            self.council_privileges = self.council_privileges.saturating_add_signed(quantity);
        } else {
            self.resources.add(resource, quantity);
        }
    }

    /// True if nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.council_privileges == 0 && self.multipliers.is_empty()
    }

    /// Resolve multipliers against the receiving player.
    #[must_use]
    pub fn resolve<S: RequirementSource + ?Sized>(&self, source: &S) -> ObtainedResourceSet {
        let mut resources = self.resources.clone();
        for multiplier in &self.multipliers {
            resources.add_set(&multiplier.resolve(source));
        }
        ObtainedResourceSet {
            resources,
            council_privileges: self.council_privileges,
        }
    }
}

impl From<ResourceSet> for ObtainableResourceSet {
    fn from(resources: ResourceSet) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }
}

/// A grant resolved for one player: concrete amounts plus privileges still
/// to be chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObtainedResourceSet {
    pub resources: ResourceSet,
    pub council_privileges: u32,
}

impl ObtainedResourceSet {
    /// Merge another obtained set into this one.
    pub fn merge(&mut self, other: &ObtainedResourceSet) {
        self.resources.add_set(&other.resources);
        self.council_privileges += other.council_privileges;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCategory;

    struct Cards(usize);

    impl RequirementSource for Cards {
        fn held(&self, _resource: ResourceType) -> i32 {
            0
        }

        fn card_count(&self, category: CardCategory) -> usize {
            if category == CardCategory::Character {
                self.0
            } else {
                0
            }
        }
    }

    #[test]
    fn test_privileges_counted_separately() {
        let grant = ObtainableResourceSet::new()
            .with(ResourceType::Gold, 1)
            .with(ResourceType::CouncilPrivilege, 2);
        assert_eq!(grant.council_privileges, 2);
        assert_eq!(grant.resources, ResourceSet::new().with(ResourceType::Gold, 1));
    }

    #[test]
    fn test_multiplier_resolution() {
        // 2 victory points for every character card
        let grant = ObtainableResourceSet::new().with_multiplier(ResourceMultiplier::new(
            RequiredResourceSet::new().cards(CardCategory::Character, 1),
            ResourceSet::new().with(ResourceType::VictoryPoints, 2),
        ));

        let obtained = grant.resolve(&Cards(3));
        assert_eq!(obtained.resources.get(ResourceType::VictoryPoints), 6);
        assert_eq!(grant.resolve(&Cards(0)).resources.get(ResourceType::VictoryPoints), 0);
    }

    #[test]
    fn test_multiplier_with_ledger_requirement() {
        // 1 gold for every 2 military points
        let multiplier = ResourceMultiplier::new(
            RequiredResourceSet::new().resource(ResourceType::MilitaryPoints, 2),
            ResourceSet::new().with(ResourceType::Gold, 1),
        );
        let held = ResourceSet::new().with(ResourceType::MilitaryPoints, 7);
        assert_eq!(multiplier.times(&held), 3);
        assert_eq!(multiplier.resolve(&held).get(ResourceType::Gold), 3);
    }

    #[test]
    fn test_merge() {
        let mut a = ObtainedResourceSet {
            resources: ResourceSet::new().with(ResourceType::Wood, 1),
            council_privileges: 1,
        };
        let b = ObtainedResourceSet {
            resources: ResourceSet::new().with(ResourceType::Wood, 2),
            council_privileges: 1,
        };
        a.merge(&b);
        assert_eq!(a.resources.get(ResourceType::Wood), 3);
        assert_eq!(a.council_privileges, 2);
    }
}
