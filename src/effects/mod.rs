//! Effect system.
//!
//! Effects are rule modifiers carried by development cards, played leader
//! cards and excommunication tiles:
//! - `Effect`: the closed set of modifiers
//! - `Capability`: the narrow interface each modifier answers
//! - `fold_value` / `fold_gain`: combine every applicable modifier
//!
//! ## Scan order
//!
//! The engine collects a player's effects in a fixed order (excommunication
//! tiles, played leaders, then development cards by category) and folds them
//! in that order. Setters come first, modifiers next, multipliers last, so the
//! result never depends on how cards were acquired.

mod capability;
mod effect;
mod fold;

pub use capability::{Bypass, Capability, ValueTarget};
pub use effect::{Conversion, Effect};
pub use fold::{fold_gain, fold_value, Ratio};
