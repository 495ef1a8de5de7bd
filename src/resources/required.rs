//! Requirements: what must be held or satisfied.
//!
//! A requirement key is either a stored resource or a fact derived from the
//! owning player (cards owned per category, or the largest category). The
//! algebra resolves derived keys by asking a [`RequirementSource`], never the
//! ledger.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::resource::{ResourceSet, ResourceType};
use crate::cards::CardCategory;

/// What a requirement entry measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementKey {
    /// Amount of a stored resource.
    Resource(ResourceType),
    /// Development cards owned in one category.
    CardCount(CardCategory),
    /// Development cards owned in the player's largest category.
    MaxCardCount,
}

/// Anything that can answer requirement queries, usually a player.
pub trait RequirementSource {
    /// Amount of a stored resource held.
    fn held(&self, resource: ResourceType) -> i32;

    /// Development cards owned in a category.
    fn card_count(&self, _category: CardCategory) -> usize {
        0
    }

    /// Resolve a requirement key to a number.
    fn measure(&self, key: RequirementKey) -> i32 {
        match key {
            RequirementKey::Resource(resource) => self.held(resource),
            RequirementKey::CardCount(category) => self.card_count(category) as i32,
            RequirementKey::MaxCardCount => CardCategory::ALL
                .iter()
                .map(|&c| self.card_count(c) as i32)
                .max()
                .unwrap_or(0),
        }
    }
}

/// A set of minimum amounts that must all be met.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredResourceSet {
    entries: SmallVec<[(RequirementKey, i32); 4]>,
}

impl RequiredResourceSet {
    /// Create an empty (always satisfied) requirement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `quantity` of a key (builder pattern). Repeated keys add up.
    #[must_use]
    pub fn with(mut self, key: RequirementKey, quantity: i32) -> Self {
        self.add(key, quantity);
        self
    }

    /// Require `quantity` of a stored resource (builder pattern).
    #[must_use]
    pub fn resource(self, resource: ResourceType, quantity: i32) -> Self {
        self.with(RequirementKey::Resource(resource), quantity)
    }

    /// Require `count` cards of a category (builder pattern).
    #[must_use]
    pub fn cards(self, category: CardCategory, count: i32) -> Self {
        self.with(RequirementKey::CardCount(category), count)
    }

    /// Requirement equal to holding every amount of a plain set.
    #[must_use]
    pub fn from_resources(resources: &ResourceSet) -> Self {
        resources
            .iter()
            .fold(Self::new(), |req, (resource, quantity)| req.resource(resource, quantity))
    }

    fn add(&mut self, key: RequirementKey, quantity: i32) {
        if let RequirementKey::Resource(resource) = key {
            if !resource.is_stored() {
                return;
            }
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing += quantity,
            None => self.entries.push((key, quantity)),
        }
    }

    /// Required amount for a key.
    #[must_use]
    pub fn get(&self, key: RequirementKey) -> i32 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |(_, q)| *q)
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (RequirementKey, i32)> + '_ {
        self.entries.iter().copied()
    }

    /// True if nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, q)| *q <= 0)
    }

    /// True if every entry is met by `source`.
    #[must_use]
    pub fn is_satisfied_by<S: RequirementSource + ?Sized>(&self, source: &S) -> bool {
        self.entries
            .iter()
            .all(|&(key, quantity)| source.measure(key) >= quantity)
    }

    /// How many whole times `source` satisfies this requirement.
    ///
    /// Integer division of held by required, minimum over the entries.
    /// A requirement with no positive entry counts as satisfied once.
    #[must_use]
    pub fn satisfaction_count<S: RequirementSource + ?Sized>(&self, source: &S) -> u32 {
        self.entries
            .iter()
            .filter(|(_, quantity)| *quantity > 0)
            .map(|&(key, quantity)| (source.measure(key).max(0) / quantity) as u32)
            .min()
            .unwrap_or(1)
    }

    /// Lower resource entries by a discount, flooring at zero.
    ///
    /// Derived keys are unaffected.
    #[must_use]
    pub fn discounted(&self, discount: &ResourceSet) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|&(key, quantity)| match key {
                RequirementKey::Resource(resource) => (key, (quantity - discount.get(resource)).max(0)),
                _ => (key, quantity),
            })
            .collect();
        Self { entries }
    }
}
