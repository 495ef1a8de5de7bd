//! Resource types and the numeric ledger.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::required::{RequiredResourceSet, RequirementSource};

/// Every resource a player can require, obtain or hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    Wood,
    Stone,
    Gold,
    Servants,
    MilitaryPoints,
    FaithPoints,
    VictoryPoints,
    /// A choice among the game-wide privilege alternatives.
    /// Never stored on a ledger.
    CouncilPrivilege,
}

impl ResourceType {
    /// Types that live on a ledger, in display order.
    pub const STORED: [ResourceType; 7] = [
        ResourceType::Wood,
        ResourceType::Stone,
        ResourceType::Gold,
        ResourceType::Servants,
        ResourceType::MilitaryPoints,
        ResourceType::FaithPoints,
        ResourceType::VictoryPoints,
    ];

    /// Goods converted to victory points at the end of the game.
    pub const GOODS: [ResourceType; 4] = [
        ResourceType::Wood,
        ResourceType::Stone,
        ResourceType::Gold,
        ResourceType::Servants,
    ];

    /// False only for the council privilege.
    #[must_use]
    pub const fn is_stored(self) -> bool {
        !matches!(self, ResourceType::CouncilPrivilege)
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceType::Wood => "wood",
            ResourceType::Stone => "stone",
            ResourceType::Gold => "gold",
            ResourceType::Servants => "servants",
            ResourceType::MilitaryPoints => "military points",
            ResourceType::FaithPoints => "faith points",
            ResourceType::VictoryPoints => "victory points",
            ResourceType::CouncilPrivilege => "council privilege",
        };
        f.write_str(name)
    }
}

/// A plain quantity of stored resources.
///
/// Zero entries are never kept, so two sets holding the same amounts compare
/// equal regardless of how they were built. Adding or subtracting a council
/// privilege does nothing here; privileges are counted by
/// [`ObtainableResourceSet`](super::ObtainableResourceSet).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSet {
    amounts: FxHashMap<ResourceType, i32>,
}

impl ResourceSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount (builder pattern).
    #[must_use]
    pub fn with(mut self, resource: ResourceType, quantity: i32) -> Self {
        self.add(resource, quantity);
        self
    }

    /// Amount held of a resource.
    #[must_use]
    pub fn get(&self, resource: ResourceType) -> i32 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    /// Add `quantity` of `resource`.
    pub fn add(&mut self, resource: ResourceType, quantity: i32) {
        if !resource.is_stored() || quantity == 0 {
            return;
        }
        let updated = self.get(resource) + quantity;
        if updated == 0 {
            self.amounts.remove(&resource);
        } else {
            self.amounts.insert(resource, updated);
        }
    }

    /// Subtract `quantity` of `resource`.
    pub fn subtract(&mut self, resource: ResourceType, quantity: i32) {
        self.add(resource, -quantity);
    }

    /// Add every entry of another set.
    pub fn add_set(&mut self, other: &ResourceSet) {
        for (resource, quantity) in other.iter() {
            self.add(resource, quantity);
        }
    }

    /// Subtract every entry of another set.
    pub fn subtract_set(&mut self, other: &ResourceSet) {
        for (resource, quantity) in other.iter() {
            self.subtract(resource, quantity);
        }
    }

    /// True if at least `quantity` of `resource` is held.
    #[must_use]
    pub fn has_at_least(&self, quantity: i32, resource: ResourceType) -> bool {
        self.get(resource) >= quantity
    }

    /// True if every amount of `other` is held.
    #[must_use]
    pub fn covers(&self, other: &ResourceSet) -> bool {
        other.iter().all(|(resource, quantity)| self.has_at_least(quantity, resource))
    }

    /// True if the requirement is met by this ledger alone.
    ///
    /// Derived keys (card counts) resolve to zero; use the owning player
    /// as the [`RequirementSource`] when those matter.
    #[must_use]
    pub fn has(&self, requirement: &RequiredResourceSet) -> bool {
        requirement.is_satisfied_by(self)
    }

    /// How many times the requirement fits into this ledger.
    #[must_use]
    pub fn satisfaction_count(&self, requirement: &RequiredResourceSet) -> u32 {
        requirement.satisfaction_count(self)
    }

    /// Iterate over non-zero entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, i32)> + '_ {
        ResourceType::STORED
            .iter()
            .filter_map(move |&resource| self.amounts.get(&resource).map(|&q| (resource, q)))
    }

    /// True if no resource is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Every amount multiplied by `times`.
    #[must_use]
    pub fn scaled(&self, times: i32) -> ResourceSet {
        let mut scaled = ResourceSet::new();
        for (resource, quantity) in self.iter() {
            scaled.add(resource, quantity * times);
        }
        scaled
    }

    /// Subtract `other`, flooring each amount at zero.
    #[must_use]
    pub fn saturating_sub(&self, other: &ResourceSet) -> ResourceSet {
        let mut reduced = ResourceSet::new();
        for (resource, quantity) in self.iter() {
            reduced.add(resource, (quantity - other.get(resource)).max(0));
        }
        reduced
    }

    /// Sum of the amounts of the given resources.
    #[must_use]
    pub fn sum_of(&self, resources: &[ResourceType]) -> i32 {
        resources.iter().map(|&r| self.get(r)).sum()
    }
}

impl RequirementSource for ResourceSet {
    fn held(&self, resource: ResourceType) -> i32 {
        self.get(resource)
    }
}

impl std::fmt::Display for ResourceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("nothing");
        }
        let parts: Vec<String> = self.iter().map(|(r, q)| format!("{q} {r}")).collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_and_subtract() {
        let mut set = ResourceSet::new();
        set.add(ResourceType::Wood, 3);
        set.add(ResourceType::Gold, 2);
        set.subtract(ResourceType::Wood, 1);

        assert_eq!(set.get(ResourceType::Wood), 2);
        assert_eq!(set.get(ResourceType::Gold), 2);
        assert_eq!(set.get(ResourceType::Stone), 0);
    }

    #[test]
    fn test_zero_entries_dropped() {
        let a = ResourceSet::new().with(ResourceType::Wood, 2).with(ResourceType::Wood, -2);
        assert!(a.is_empty());
        assert_eq!(a, ResourceSet::new());
    }

    #[test]
    fn test_council_privilege_is_noop() {
        let mut set = ResourceSet::new();
        set.add(ResourceType::CouncilPrivilege, 2);
        assert!(set.is_empty());
        set.subtract(ResourceType::CouncilPrivilege, 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_covers() {
        let held = ResourceSet::new().with(ResourceType::Wood, 2).with(ResourceType::Gold, 5);
        let cost = ResourceSet::new().with(ResourceType::Gold, 3);
        assert!(held.covers(&cost));
        assert!(!held.covers(&cost.clone().with(ResourceType::Stone, 1)));
    }

    #[test]
    fn test_saturating_sub() {
        let cost = ResourceSet::new().with(ResourceType::Gold, 4).with(ResourceType::Wood, 1);
        let discount = ResourceSet::new().with(ResourceType::Gold, 3).with(ResourceType::Wood, 2);
        let reduced = cost.saturating_sub(&discount);
        assert_eq!(reduced, ResourceSet::new().with(ResourceType::Gold, 1));
    }

    #[test]
    fn test_display() {
        let set = ResourceSet::new().with(ResourceType::Gold, 3).with(ResourceType::Wood, 1);
        assert_eq!(set.to_string(), "1 wood, 3 gold");
        assert_eq!(ResourceSet::new().to_string(), "nothing");
    }

    fn arb_set() -> impl Strategy<Value = ResourceSet> {
        proptest::collection::vec((0usize..7, 0i32..50), 0..7).prop_map(|entries| {
            let mut set = ResourceSet::new();
            for (index, quantity) in entries {
                set.add(ResourceType::STORED[index], quantity);
            }
            set
        })
    }

    proptest! {
        #[test]
        fn add_then_subtract_restores(original in arb_set(), delta in arb_set()) {
            let mut ledger = original.clone();
            ledger.add_set(&delta);
            ledger.subtract_set(&delta);
            prop_assert_eq!(ledger, original);
        }

        #[test]
        fn has_at_least_matches_held(held in 0i32..40, asked in 0i32..40) {
            let set = ResourceSet::new().with(ResourceType::Stone, held);
            prop_assert_eq!(set.has_at_least(asked, ResourceType::Stone), held >= asked);
        }
    }
}
