//! Player actions: one variant per inbound engine call.
//!
//! The network boundary decodes each request into an [`Action`] and hands it,
//! together with the acting username, to the rules engine. Accepted actions
//! are recorded as [`ActionRecord`]s so client mirrors can replay them.

use serde::{Deserialize, Serialize};

use super::family::FamilyColor;
use crate::board::SpaceId;
use crate::cards::CardCategory;
use crate::resources::ResourceSet;

/// Outcome chosen by a player queued at a Vatican report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExcommunicationChoice {
    /// Keep faith points and receive the period's excommunication tile.
    AcceptExcommunication,
    /// Give up all faith points (scored on the faith track) and skip the tile.
    SupportChurch,
}

/// A player request.
///
/// `privileges` fields carry the concrete council-privilege alternatives the
/// player picks for every privilege the action grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Pick a personal bonus tile during the tile draft.
    ChooseBonusTile { tile: u32 },

    /// Pick a leader card from the current draft pack.
    ChooseLeader { name: String },

    /// Spend servants to raise the value of this turn's placement.
    SpendServants { amount: i32 },

    /// Place a family member on a market, production, harvest or council space.
    GoToSpace {
        space: SpaceId,
        color: FamilyColor,
        privileges: Vec<ResourceSet>,
    },

    /// Place a family member on a tower floor; `cost` picks a cost alternative.
    GoToFloor {
        category: CardCategory,
        floor: usize,
        color: FamilyColor,
        cost: Option<usize>,
    },

    /// Finish taking the staged development card.
    TakeCard { privileges: Vec<ResourceSet> },

    /// Activate one owned card during production or harvest.
    ActivateCard {
        name: String,
        conversion: Option<usize>,
        privileges: Vec<ResourceSet>,
    },

    /// Close the production or harvest phase.
    FinishActivation,

    /// Play a leader card from hand.
    PlayLeader { name: String },

    /// Discard a leader card for one council privilege.
    DiscardLeader {
        name: String,
        privileges: Vec<ResourceSet>,
    },

    /// Fire a played leader's once-per-round bonus.
    ActivateLeader {
        name: String,
        privileges: Vec<ResourceSet>,
    },

    /// End the current turn.
    EndTurn,

    /// Answer a Vatican report.
    DecideExcommunication { choice: ExcommunicationChoice },
}

impl Action {
    /// Short name for logs and rejection reasons.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::ChooseBonusTile { .. } => "choose-bonus-tile",
            Action::ChooseLeader { .. } => "choose-leader",
            Action::SpendServants { .. } => "spend-servants",
            Action::GoToSpace { .. } => "go-to-space",
            Action::GoToFloor { .. } => "go-to-floor",
            Action::TakeCard { .. } => "take-card",
            Action::ActivateCard { .. } => "activate-card",
            Action::FinishActivation => "finish-activation",
            Action::PlayLeader { .. } => "play-leader",
            Action::DiscardLeader { .. } => "discard-leader",
            Action::ActivateLeader { .. } => "activate-leader",
            Action::EndTurn => "end-turn",
            Action::DecideExcommunication { .. } => "decide-excommunication",
        }
    }
}

/// An accepted action with ordering metadata.
///
/// Used for:
/// - Mirror replay (clients re-apply committed records)
/// - Debugging and audit of a finished game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Username of the player who acted.
    pub player: String,

    /// The action taken.
    pub action: Action,

    /// Round when the action was taken.
    pub round: u8,

    /// Game-wide sequence number (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: impl Into<String>, action: Action, round: u8, sequence: u32) -> Self {
        Self {
            player: player.into(),
            action,
            round,
            sequence,
        }
    }
}
