//! The game aggregate.
//!
//! `Game` owns everything one match needs: players in turn order, the board,
//! undrawn cards and tiles, dice, the current phase and the action history.
//! It is created once per room from a [`GameSetup`] and mutated only by the
//! rules engine (see [`crate::rules`]).
//!
//! ## Cloning
//!
//! The action history is an `im::Vector`, so cloning a game for a mirror or
//! a snapshot does not copy the full log.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::setup::GameSetup;
use crate::board::{ActionType, Board};
use crate::cards::{CardCategory, DevelopmentDeck, ExcommunicationTile, LeaderCard, PersonalBonusTile};
use crate::core::{ActionError, ActionRecord, ActionResult, Dice, GameRng, RulesConfig, SetupError};
use crate::resources::CouncilPrivileges;

/// Phases of the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    WaitingForPlayers,
    Started,
    DraftingBonusTiles,
    DraftingLeaderCards,
    PlayerTurn,
    /// A floor was entered; the card waits for `TakeCard`.
    TakingCard,
    Production,
    Harvest,
    VaticanReport,
    GameEnded,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::WaitingForPlayers => "waiting for players",
            Phase::Started => "started",
            Phase::DraftingBonusTiles => "drafting bonus tiles",
            Phase::DraftingLeaderCards => "drafting leader cards",
            Phase::PlayerTurn => "player turn",
            Phase::TakingCard => "taking card",
            Phase::Production => "production",
            Phase::Harvest => "harvest",
            Phase::VaticanReport => "vatican report",
            Phase::GameEnded => "game ended",
        };
        f.write_str(name)
    }
}

/// The floor whose card is being taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCard {
    pub category: CardCategory,
    pub floor: usize,
}

/// An open production or harvest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub action: ActionType,
    /// Action value the space was entered with.
    pub value: i32,
    /// Cards already activated during this entry.
    pub activated: Vec<String>,
}

/// One match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    pub config: RulesConfig,
    /// Players in turn order.
    pub players: Vec<Player>,
    /// Index of the current player in `players`.
    pub(crate) current: usize,
    /// Current round, 0 before the first round starts.
    pub round: u8,
    pub phase: Phase,
    pub dice: Dice,
    pub board: Board,
    pub deck: DevelopmentDeck,
    /// Tiles still on offer in the bonus tile draft.
    pub bonus_tiles: Vec<PersonalBonusTile>,
    /// Leader pool before the draft, then one pack per seat.
    pub leader_pool: Vec<LeaderCard>,
    pub leader_packs: Vec<Vec<LeaderCard>>,
    pub excommunications: Vec<ExcommunicationTile>,
    pub privileges: CouncilPrivileges,
    /// Turns played in the current round.
    pub(crate) turns_taken: u32,
    pub pending_card: Option<PendingCard>,
    pub activation: Option<Activation>,
    /// Players still to pick a bonus tile, in pick order.
    pub(crate) tile_draft: Vec<String>,
    /// Players who picked a leader in the current pass.
    pub(crate) leader_picks: Vec<String>,
    /// Players still to answer the current Vatican report.
    pub vatican_queue: Vec<String>,
    pub history: Vector<ActionRecord>,
    pub(crate) sequence: u32,
    pub(crate) rng: GameRng,
    /// Final scores in turn order, once the game has ended.
    pub final_scores: Option<Vec<(String, i32)>>,
}

impl Game {
    /// Create a game waiting for players.
    pub fn new(setup: GameSetup, seed: u64) -> Result<Self, SetupError> {
        setup.validate()?;
        Ok(Self {
            config: setup.config,
            players: Vec::new(),
            current: 0,
            round: 0,
            phase: Phase::WaitingForPlayers,
            dice: Dice::default(),
            board: setup.board,
            deck: DevelopmentDeck::from_cards(setup.cards),
            bonus_tiles: setup.bonus_tiles,
            leader_pool: setup.leaders,
            leader_packs: Vec::new(),
            excommunications: setup.excommunications,
            privileges: setup.privileges,
            turns_taken: 0,
            pending_card: None,
            activation: None,
            tile_draft: Vec::new(),
            leader_picks: Vec::new(),
            vatican_queue: Vec::new(),
            history: Vector::new(),
            sequence: 0,
            rng: GameRng::new(seed),
            final_scores: None,
        })
    }

    /// The player whose turn it is. `None` before anyone has joined.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    #[must_use]
    pub fn player(&self, username: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.username == username)
    }

    pub fn player_mut(&mut self, username: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.username == username)
    }

    /// Seat of a player in the current turn order.
    pub(crate) fn seat_of(&self, username: &str) -> ActionResult<usize> {
        self.players
            .iter()
            .position(|p| p.username == username)
            .ok_or_else(|| ActionError::PlayerNotFound(username.to_string()))
    }

    /// Usernames in turn order.
    #[must_use]
    pub fn turn_order(&self) -> Vec<String> {
        self.players.iter().map(|p| p.username.clone()).collect()
    }

    /// Period of the current round.
    #[must_use]
    pub fn period(&self) -> u8 {
        self.config.period_of(self.round.max(1))
    }

    /// Overwrite the dice, e.g. when a mirror receives a throw.
    pub fn set_dice(&mut self, dice: Dice) {
        self.dice = dice;
    }

    /// Number of accepted actions so far.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}
