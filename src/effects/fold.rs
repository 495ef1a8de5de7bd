//! Folding value effects over a base value.
//!
//! Order is fixed:
//! 1. setters (two or more applicable setters is a configuration error),
//! 2. modifiers, in the order the effects were scanned,
//! 3. multipliers, rounding to the nearest integer (halves round up).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::capability::ValueTarget;
use super::effect::Effect;
use crate::core::{ActionError, ActionResult};
use crate::resources::ResourceSet;

/// An exact fraction used by multiplicative effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    pub numerator: u32,
    pub denominator: u32,
}

impl Ratio {
    /// Create a ratio. A zero denominator is treated as one.
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator: if denominator == 0 { 1 } else { denominator },
        }
    }

    /// Scale `value`, rounding to the nearest integer.
    #[must_use]
    pub fn apply(self, value: i32) -> i32 {
        let numerator = i64::from(self.numerator);
        let denominator = i64::from(self.denominator.max(1));
        let doubled = 2 * i64::from(value) * numerator + denominator;
        doubled.div_euclid(2 * denominator) as i32
    }
}

/// Fold every value effect in `effects` that applies to `target` over `base`.
pub fn fold_value<'a, I>(base: i32, effects: I, target: ValueTarget) -> ActionResult<i32>
where
    I: IntoIterator<Item = &'a Effect>,
{
    let effects: SmallVec<[&Effect; 8]> = effects.into_iter().collect();

    let setters: SmallVec<[i32; 2]> = effects.iter().filter_map(|e| e.setter_for(target)).collect();
    let mut value = match setters.as_slice() {
        [] => base,
        [value] => *value,
        _ => return Err(ActionError::ConflictingSetters(target.to_string())),
    };

    for delta in effects.iter().filter_map(|e| e.modifier_for(target)) {
        value += delta;
    }

    for ratio in effects.iter().filter_map(|e| e.multiplier_for(target)) {
        value = ratio.apply(value);
    }

    Ok(value)
}

/// Apply resource-gain modifiers to a gain.
///
/// Only resources actually gained are modified, and a modified amount never
/// drops below zero.
pub fn fold_gain<'a, I>(gain: &ResourceSet, effects: I) -> ResourceSet
where
    I: IntoIterator<Item = &'a Effect>,
{
    let effects: SmallVec<[&Effect; 8]> = effects.into_iter().collect();
    let mut folded = ResourceSet::new();
    for (resource, quantity) in gain.iter() {
        if quantity <= 0 {
            folded.add(resource, quantity);
            continue;
        }
        let delta: i32 = effects.iter().filter_map(|e| e.gain_modifier_for(resource)).sum();
        folded.add(resource, (quantity + delta).max(0));
    }
    folded
}
