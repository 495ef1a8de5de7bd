//! Resource algebra.
//!
//! - `ResourceSet`: the numeric ledger of stored resources
//! - `RequiredResourceSet`: minimum amounts, possibly of derived facts
//! - `ObtainableResourceSet` / `ObtainedResourceSet`: grants before and
//!   after resolving multipliers for a player
//! - `CouncilPrivileges`: the alternatives a privilege is exchanged for
//!
//! Council privileges never appear on a ledger. A grant counts them and the
//! receiving player names one concrete alternative per privilege.

mod obtainable;
mod privilege;
mod required;
mod resource;

pub use obtainable::{ObtainableResourceSet, ObtainedResourceSet, ResourceMultiplier};
pub use privilege::CouncilPrivileges;
pub use required::{RequiredResourceSet, RequirementKey, RequirementSource};
pub use resource::{ResourceSet, ResourceType};
