//! Logged-in users and open rooms.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use super::{Room, RoomError};
use crate::events::GameEvent;
use crate::game::{Game, GameSetup};

/// Lobby state shared by every room of a server.
#[derive(Debug)]
pub struct Lobby {
    setup: GameSetup,
    seed: u64,
    users: FxHashSet<String>,
    /// Room each seated user sits in.
    seats: FxHashMap<String, u32>,
    rooms: FxHashMap<u32, Arc<Room>>,
    next_room: u32,
}

impl Lobby {
    /// Create a lobby whose rooms all play `setup`.
    ///
    /// Room `n` is seeded with `seed + n`.
    pub fn new(setup: GameSetup, seed: u64) -> Result<Self, RoomError> {
        setup.validate()?;
        Ok(Self {
            setup,
            seed,
            users: FxHashSet::default(),
            seats: FxHashMap::default(),
            rooms: FxHashMap::default(),
            next_room: 0,
        })
    }

    /// Register a username.
    pub fn login(&mut self, username: &str) -> Result<(), RoomError> {
        if !self.users.insert(username.to_string()) {
            return Err(RoomError::UsernameTaken(username.to_string()));
        }
        info!(user = username, "logged in");
        Ok(())
    }

    #[must_use]
    pub fn is_logged_in(&self, username: &str) -> bool {
        self.users.contains(username)
    }

    #[must_use]
    pub fn room(&self, id: u32) -> Option<Arc<Room>> {
        self.rooms.get(&id).cloned()
    }

    /// Room a user is seated in.
    #[must_use]
    pub fn room_of(&self, username: &str) -> Option<Arc<Room>> {
        self.seats.get(username).and_then(|id| self.room(*id))
    }

    /// Drop rooms whose game has ended and free their seats.
    async fn close_finished_rooms(&mut self) {
        let mut finished = Vec::new();
        for (&id, room) in &self.rooms {
            if room.is_finished().await {
                finished.push(id);
            }
        }
        for id in finished {
            self.rooms.remove(&id);
            self.seats.retain(|_, seat| *seat != id);
            info!(room = id, "room closed");
        }
    }

    fn check_can_sit(&self, username: &str) -> Result<(), RoomError> {
        if !self.is_logged_in(username) {
            return Err(RoomError::NotLoggedIn(username.to_string()));
        }
        if self.seats.contains_key(username) {
            return Err(RoomError::AlreadySeated(username.to_string()));
        }
        Ok(())
    }

    /// Open a new room with `username` as its first player.
    pub async fn create_room(&mut self, username: &str) -> Result<Arc<Room>, RoomError> {
        self.close_finished_rooms().await;
        self.check_can_sit(username)?;

        let id = self.next_room;
        let game = Game::new(self.setup.clone(), self.seed.wrapping_add(u64::from(id)))?;
        let room = Arc::new(Room::new(id, game));
        room.join(username).await?;

        self.next_room += 1;
        self.rooms.insert(id, Arc::clone(&room));
        self.seats.insert(username.to_string(), id);
        info!(room = id, user = username, "room created");
        Ok(room)
    }

    /// Seat `username` in room `id`.
    pub async fn join_room(&mut self, username: &str, id: u32) -> Result<Vec<GameEvent>, RoomError> {
        self.close_finished_rooms().await;
        self.check_can_sit(username)?;
        let room = self.room(id).ok_or(RoomError::RoomNotFound(id))?;

        let events = room.join(username).await?;
        self.seats.insert(username.to_string(), id);
        Ok(events)
    }

    /// Seat `username` in the oldest open room, or open a new one.
    pub async fn join_any(&mut self, username: &str) -> Result<Arc<Room>, RoomError> {
        self.close_finished_rooms().await;
        self.check_can_sit(username)?;

        let mut ids: Vec<u32> = self.rooms.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let room = Arc::clone(&self.rooms[&id]);
            if room.is_open().await {
                self.join_room(username, id).await?;
                return Ok(room);
            }
        }
        self.create_room(username).await
    }
}
