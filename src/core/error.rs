//! Rejection and setup error types.

use crate::core::FamilyColor;

/// Why an engine entry point refused an action.
///
/// Every variant is recoverable: the game state is untouched when one is
/// returned. Lookup failures on identifiers supplied by the caller get their
/// own variants so the network layer can report them precisely.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("action not allowed: {0}")]
    NotAllowed(String),
    #[error("player not found: {0}")]
    PlayerNotFound(String),
    #[error("card not found: {0}")]
    CardNotFound(String),
    #[error("tile not found: {0}")]
    TileNotFound(u32),
    #[error("more than one value setter applies to {0}")]
    ConflictingSetters(String),
}

impl ActionError {
    /// Build a `NotAllowed` rejection from a reason.
    pub fn not_allowed(reason: impl Into<String>) -> Self {
        Self::NotAllowed(reason.into())
    }

    /// Human-readable reason, without the variant prefix.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            ActionError::NotAllowed(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// Shorthand for engine results.
pub type ActionResult<T> = Result<T, ActionError>;

/// Problems found while validating a `GameSetup` handed over by the loader.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{count} cards set the value of the {color} family member; at most one is allowed")]
    MultipleSetters { color: FamilyColor, count: usize },
    #[error("card {card} sets the value of the {color} family member more than once")]
    DuplicateSetterOnCard { card: String, color: FamilyColor },
    #[error("excommunication tiles must cover periods 1..={periods}, found {found}")]
    MissingExcommunications { periods: u8, found: usize },
    #[error("council privilege list is empty")]
    NoCouncilPrivileges,
    #[error("duplicate personal bonus tile id {0}")]
    DuplicateTile(u32),
    #[error("{players} players need {players} personal bonus tiles, found {found}")]
    NotEnoughBonusTiles { players: usize, found: usize },
}
