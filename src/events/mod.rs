//! Outbound events.
//!
//! Every accepted engine call returns the events it produced, in the order
//! the mutations happened. The network boundary forwards them to clients;
//! nothing is emitted for a rejected call.

use serde::{Deserialize, Serialize};

use crate::board::SpaceId;
use crate::cards::CardCategory;
use crate::core::{Dice, ExcommunicationChoice, FamilyColor};
use crate::game::Phase;
use crate::resources::ResourceSet;

/// Where a family member was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Floor { category: CardCategory, floor: usize },
    Space(SpaceId),
}

/// Something the engine did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerJoined { player: String },
    PhaseChanged { phase: Phase },
    RoundStarted { round: u8, period: u8 },
    TurnOrderChanged { order: Vec<String> },
    PlayerTurnStarted { player: String },
    /// New cards dealt onto the towers, bottom floor first.
    CardsDrawn { category: CardCategory, cards: Vec<String> },
    DiceThrown { dice: Dice },
    BonusTileChosen { player: String, tile: u32 },
    LeaderChosen { player: String, leader: String },
    ServantsSpent { player: String, amount: i32 },
    SpaceOccupied {
        player: String,
        color: FamilyColor,
        placement: Placement,
    },
    ResourcesChanged { player: String, resources: ResourceSet },
    DevelopmentCardTaken { player: String, card: String },
    CardActivated { player: String, card: String },
    LeaderPlayed { player: String, leader: String },
    LeaderDiscarded { player: String, leader: String },
    LeaderActivated { player: String, leader: String },
    VaticanReportStarted { round: u8, threshold: i32, queued: Vec<String> },
    ExcommunicationDecided {
        player: String,
        excommunicated: bool,
        choice: Option<ExcommunicationChoice>,
    },
    GameEnded { scores: Vec<(String, i32)> },
}

impl GameEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PlayerJoined { .. } => "player-joined",
            GameEvent::PhaseChanged { .. } => "phase-changed",
            GameEvent::RoundStarted { .. } => "round-started",
            GameEvent::TurnOrderChanged { .. } => "turn-order-changed",
            GameEvent::PlayerTurnStarted { .. } => "player-turn-started",
            GameEvent::CardsDrawn { .. } => "cards-drawn",
            GameEvent::DiceThrown { .. } => "dice-thrown",
            GameEvent::BonusTileChosen { .. } => "bonus-tile-chosen",
            GameEvent::LeaderChosen { .. } => "leader-chosen",
            GameEvent::ServantsSpent { .. } => "servants-spent",
            GameEvent::SpaceOccupied { .. } => "space-occupied",
            GameEvent::ResourcesChanged { .. } => "resources-changed",
            GameEvent::DevelopmentCardTaken { .. } => "development-card-taken",
            GameEvent::CardActivated { .. } => "card-activated",
            GameEvent::LeaderPlayed { .. } => "leader-played",
            GameEvent::LeaderDiscarded { .. } => "leader-discarded",
            GameEvent::LeaderActivated { .. } => "leader-activated",
            GameEvent::VaticanReportStarted { .. } => "vatican-report-started",
            GameEvent::ExcommunicationDecided { .. } => "excommunication-decided",
            GameEvent::GameEnded { .. } => "game-ended",
        }
    }
}
