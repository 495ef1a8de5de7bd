//! The rules controller.
//!
//! Every player request is a method on [`Game`](crate::game::Game), grouped
//! here by concern:
//! - `flow`: joining, starting, rounds and turns
//! - `drafting`: bonus tile and leader drafts
//! - `placement`, `taking`, `activation`: family member actions
//! - `leaders`, `vatican`, `scoring`
//!
//! Each entry point validates everything first and mutates only once all
//! checks have passed, so a rejected request leaves the game untouched.
//! [`RulesEngine`] dispatches an [`Action`](crate::core::Action) to the
//! matching entry point and records it.

mod activation;
mod drafting;
pub mod engine;
mod flow;
mod leaders;
mod placement;
mod scoring;
mod taking;
mod values;
mod vatican;

pub use engine::{GameResult, RulesEngine};
