//! # lorenzo-rules
//!
//! Shared rules engine for a 2-4 player worker-placement board game set in
//! Renaissance Florence. Players place family members on tower floors and
//! action spaces, collect development cards, and face a Vatican report at
//! the end of every period.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every request is checked in full before any
//!    state changes. A rejection leaves the game untouched.
//!
//! 2. **Closed effects**: card abilities are a closed `Effect` enum. The
//!    engine scans a player's active cards and folds the effects that answer
//!    the capability it is computing.
//!
//! 3. **Deterministic replay**: all randomness comes from a seeded RNG that
//!    travels with the game, so clients can mirror the server by replaying
//!    committed actions.
//!
//! ## Modules
//!
//! - `core`: RNG, dice, actions, rule configuration, errors
//! - `resources`: resource ledgers, requirements, grants, council privileges
//! - `effects`: effect definitions and value folding
//! - `cards`: development cards, leaders, tiles and decks
//! - `board`: towers and action spaces
//! - `game`: players and the game aggregate
//! - `rules`: the controller and `RulesEngine`
//! - `events`: outbound notifications
//! - `room`: lobby, rooms and the start countdown
//! - `mirror`: client-side replay and desync handling

pub mod board;
pub mod cards;
pub mod core;
pub mod effects;
pub mod events;
pub mod game;
pub mod mirror;
pub mod resources;
pub mod room;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionRecord, ActionResult, Dice, ExcommunicationChoice, FamilyColor, GameRng,
    GameRngState, RulesConfig, SetupError,
};

pub use crate::resources::{
    CouncilPrivileges, ObtainableResourceSet, ObtainedResourceSet, RequiredResourceSet, RequirementKey,
    ResourceMultiplier, ResourceSet, ResourceType,
};

pub use crate::effects::{fold_gain, fold_value, Bypass, Capability, Conversion, Effect, Ratio, ValueTarget};

pub use crate::cards::{
    CardCategory, CostAlternative, DevelopmentCard, DevelopmentDeck, ExcommunicationTile, LeaderCard,
    PersonalBonusTile, PlayedLeader,
};

pub use crate::board::{ActionScope, ActionSpace, ActionType, Board, Capacity, Floor, SpaceId, Tower};

pub use crate::game::{Game, GameSetup, Phase, Player, PlayerColor};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::events::{GameEvent, Placement};

pub use crate::room::{Countdown, Lobby, Room, RoomError};

pub use crate::mirror::{BoundedResync, ClientMirror, DesyncPolicy, Recovery, ResyncPolicy, Snapshot, SyncError};
