//! Rooms: one game, its players and its start countdown.
//!
//! Every action on a room goes through a single `tokio::sync::Mutex`, so a
//! game never sees two writers. Events produced by accepted actions (and by
//! the countdown starting the game) are published on a broadcast channel.

mod countdown;
mod lobby;

pub use countdown::Countdown;
pub use lobby::Lobby;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use crate::core::{Action, ActionError, ActionRecord, SetupError};
use crate::events::GameEvent;
use crate::game::{Game, Phase};
use crate::mirror::{Snapshot, SyncError};
use crate::rules::RulesEngine;

/// Capacity of a room's event channel.
const EVENT_BUFFER: usize = 256;

/// Room and lobby errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("Username {0} is already logged in")]
    UsernameTaken(String),
    #[error("{0} is not logged in")]
    NotLoggedIn(String),
    #[error("{0} is already seated in a room")]
    AlreadySeated(String),
    #[error("Room {0} does not exist")]
    RoomNotFound(u32),
    #[error("Invalid game setup: {0}")]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

struct RoomState {
    game: Game,
    countdown: Countdown,
}

/// A game behind its lock.
pub struct Room {
    id: u32,
    state: Arc<Mutex<RoomState>>,
    events: broadcast::Sender<GameEvent>,
}

impl Room {
    #[must_use]
    pub fn new(id: u32, game: Game) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            id,
            state: Arc::new(Mutex::new(RoomState {
                game,
                countdown: Countdown::new(),
            })),
            events,
        }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Receive every event the room publishes from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Seat a player.
    ///
    /// Reaching the minimum player count arms the start countdown, later
    /// joins interrupt it, and a full room starts at once.
    pub async fn join(&self, username: &str) -> Result<Vec<GameEvent>, RoomError> {
        let mut state = self.state.lock().await;
        let mut events = state.game.join(username)?;

        let seated = state.game.players.len();
        if seated >= state.game.config.max_players {
            state.countdown.cancel();
            events.extend(state.game.start()?);
            info!(room = self.id, seated, "room full, game started");
        } else if seated >= state.game.config.min_players {
            if state.countdown.is_armed() {
                state.countdown.interrupt();
            } else {
                let delay = state.game.config.room_start_delay;
                let expiry = self.start_on_expiry();
                state.countdown.arm(delay, expiry);
            }
        }

        self.publish(&events);
        Ok(events)
    }

    fn start_on_expiry(&self) -> impl Future<Output = ()> + Send + 'static {
        let shared = Arc::clone(&self.state);
        let sender = self.events.clone();
        let room = self.id;
        async move {
            let mut state = shared.lock().await;
            if state.game.phase != Phase::WaitingForPlayers {
                return;
            }
            match state.game.start() {
                Ok(events) => {
                    info!(room, "countdown expired, game started");
                    for event in events {
                        let _ = sender.send(event);
                    }
                }
                Err(error) => warn!(room, %error, "countdown expired but the game could not start"),
            }
        }
    }

    /// Apply a player action.
    pub async fn submit(&self, username: &str, action: &Action) -> Result<Vec<GameEvent>, RoomError> {
        let mut state = self.state.lock().await;
        let events = state.game.apply_action(username, action)?;
        self.publish(&events);
        Ok(events)
    }

    /// True while players can still join.
    pub async fn is_open(&self) -> bool {
        let state = self.state.lock().await;
        state.game.phase == Phase::WaitingForPlayers && state.game.players.len() < state.game.config.max_players
    }

    /// True once the game has ended.
    pub async fn is_finished(&self) -> bool {
        self.state.lock().await.game.phase == Phase::GameEnded
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.game.phase
    }

    /// Seated usernames in turn order.
    pub async fn players(&self) -> Vec<String> {
        self.state.lock().await.game.turn_order()
    }

    /// Time left before the countdown starts the game.
    pub async fn countdown_remaining(&self) -> Option<Duration> {
        self.state.lock().await.countdown.remaining()
    }

    /// Committed records from `sequence` on, for client mirrors.
    pub async fn records_since(&self, sequence: u32) -> Vec<ActionRecord> {
        let state = self.state.lock().await;
        state
            .game
            .history
            .iter()
            .filter(|r| r.sequence >= sequence)
            .cloned()
            .collect()
    }

    /// Encoded copy of the game for a client mirror.
    pub async fn snapshot(&self) -> Result<Snapshot, SyncError> {
        Snapshot::encode(&self.state.lock().await.game)
    }

    fn publish(&self, events: &[GameEvent]) {
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event.clone());
        }
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room").field("id", &self.id).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ExcommunicationTile;
    use crate::core::RulesConfig;
    use crate::game::GameSetup;

    fn room() -> Room {
        let setup = GameSetup::new()
            .with_config(RulesConfig::new().with_room_start_delay(Duration::from_secs(30)))
            .with_excommunications((1..=3).map(|p| ExcommunicationTile::new(u32::from(p), p)));
        Room::new(1, Game::new(setup, 7).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_starts_the_game() {
        let room = room();
        let mut events = room.subscribe();
        room.join("anna").await.unwrap();
        assert_eq!(room.countdown_remaining().await, None);

        room.join("bruno").await.unwrap();
        assert_eq!(room.countdown_remaining().await, Some(Duration::from_secs(30)));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(room.phase().await, Phase::PlayerTurn);

        let mut started = false;
        while let Ok(event) = events.try_recv() {
            started |= matches!(event, GameEvent::PhaseChanged { phase: Phase::Started });
        }
        assert!(started);
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_resumes_remaining_delay() {
        let room = room();
        room.join("anna").await.unwrap();
        room.join("bruno").await.unwrap();

        tokio::time::sleep(Duration::from_secs(20)).await;
        room.join("carla").await.unwrap();
        tokio::task::yield_now().await;
        assert_eq!(room.countdown_remaining().await, Some(Duration::from_secs(10)));

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_ne!(room.phase().await, Phase::WaitingForPlayers);
        assert_eq!(room.players().await.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_room_starts_immediately() {
        let room = room();
        for name in ["anna", "bruno", "carla", "dario"] {
            room.join(name).await.unwrap();
        }
        assert_eq!(room.phase().await, Phase::PlayerTurn);
        assert!(!room.is_open().await);
        assert!(matches!(
            room.join("elio").await,
            Err(RoomError::Action(ActionError::NotAllowed(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_serializes_actions() {
        let room = room();
        for name in ["anna", "bruno", "carla", "dario"] {
            room.join(name).await.unwrap();
        }
        let first = room.players().await[0].clone();
        room.submit(&first, &Action::EndTurn).await.unwrap();
        assert!(room.submit(&first, &Action::EndTurn).await.is_err());
    }
}
