//! Core building blocks: RNG, dice and family members, actions, rule
//! configuration and error types.

pub mod action;
pub mod config;
pub mod error;
pub mod family;
pub mod rng;

pub use action::{Action, ActionRecord, ExcommunicationChoice};
pub use config::RulesConfig;
pub use error::{ActionError, ActionResult, SetupError};
pub use family::{Dice, FamilyColor};
pub use rng::{GameRng, GameRngState};
