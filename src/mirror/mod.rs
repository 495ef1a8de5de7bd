//! Client-side mirror of a server game.
//!
//! A client keeps a local [`Game`] and replays every record the server
//! committed through the same rules engine. The replay is deterministic
//! (the RNG state travels in the snapshot), so a rejection can only mean
//! the two copies disagree. That condition is handed to a [`DesyncPolicy`]
//! which decides between asking for a fresh snapshot and giving up.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ActionError, ActionRecord};
use crate::events::GameEvent;
use crate::game::Game;
use crate::rules::RulesEngine;

/// Mirror errors
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Record {sequence} was rejected locally: {reason}")]
    OutOfSync { sequence: u32, reason: ActionError },
    #[error("Expected record {expected}, received {received}")]
    SequenceGap { expected: u32, received: u32 },
    #[error("Mirror is waiting for a snapshot")]
    AwaitingSnapshot,
    #[error("Mirror gave up after a desync")]
    Closed,
    #[error("Snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// A bincode-encoded game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    bytes: Vec<u8>,
}

impl Snapshot {
    pub fn encode(game: &Game) -> Result<Self, SyncError> {
        Ok(Self {
            bytes: bincode::serialize(game)?,
        })
    }

    pub fn decode(&self) -> Result<Game, SyncError> {
        Ok(bincode::deserialize(&self.bytes)?)
    }

    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// What to do after a desync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Stop applying records until a new snapshot arrives.
    Resync,
    /// Close the mirror.
    GiveUp,
}

/// Decides how a mirror recovers from a desync.
pub trait DesyncPolicy {
    fn on_desync(&mut self, error: &SyncError) -> Recovery;
}

/// Always ask for a fresh snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResyncPolicy;

impl DesyncPolicy for ResyncPolicy {
    fn on_desync(&mut self, _error: &SyncError) -> Recovery {
        Recovery::Resync
    }
}

/// Resync up to `limit` times, then give up.
#[derive(Clone, Copy, Debug)]
pub struct BoundedResync {
    pub limit: u32,
    used: u32,
}

impl BoundedResync {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }
}

impl DesyncPolicy for BoundedResync {
    fn on_desync(&mut self, _error: &SyncError) -> Recovery {
        if self.used >= self.limit {
            return Recovery::GiveUp;
        }
        self.used += 1;
        Recovery::Resync
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MirrorState {
    Live,
    AwaitingSnapshot,
    Closed,
}

/// Local replica of a server game.
#[derive(Debug)]
pub struct ClientMirror<P: DesyncPolicy> {
    game: Game,
    policy: P,
    state: MirrorState,
}

impl<P: DesyncPolicy> ClientMirror<P> {
    pub fn new(snapshot: &Snapshot, policy: P) -> Result<Self, SyncError> {
        Ok(Self {
            game: snapshot.decode()?,
            policy,
            state: MirrorState::Live,
        })
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn needs_snapshot(&self) -> bool {
        self.state == MirrorState::AwaitingSnapshot
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == MirrorState::Closed
    }

    /// Replay a committed record.
    ///
    /// Records at or below the local sequence were already applied and are
    /// skipped.
    pub fn apply(&mut self, record: &ActionRecord) -> Result<Vec<GameEvent>, SyncError> {
        match self.state {
            MirrorState::Closed => return Err(SyncError::Closed),
            MirrorState::AwaitingSnapshot => return Err(SyncError::AwaitingSnapshot),
            MirrorState::Live => {}
        }

        let expected = self.game.sequence();
        if record.sequence < expected {
            debug!(sequence = record.sequence, "record already applied");
            return Ok(Vec::new());
        }
        if record.sequence > expected {
            return Err(self.desync(SyncError::SequenceGap {
                expected,
                received: record.sequence,
            }));
        }

        // Replay on a copy so a rejection never leaves a half-applied record.
        let mut next = self.game.clone();
        match next.apply_record(record) {
            Ok(events) => {
                self.game = next;
                Ok(events)
            }
            Err(reason) => Err(self.desync(SyncError::OutOfSync {
                sequence: record.sequence,
                reason,
            })),
        }
    }

    fn desync(&mut self, error: SyncError) -> SyncError {
        let recovery = self.policy.on_desync(&error);
        warn!(%error, ?recovery, "mirror out of sync");
        self.state = match recovery {
            Recovery::Resync => MirrorState::AwaitingSnapshot,
            Recovery::GiveUp => MirrorState::Closed,
        };
        error
    }

    /// Replace the local game with a server snapshot.
    pub fn resync(&mut self, snapshot: &Snapshot) -> Result<(), SyncError> {
        if self.state == MirrorState::Closed {
            return Err(SyncError::Closed);
        }
        self.game = snapshot.decode()?;
        self.state = MirrorState::Live;
        debug!(sequence = self.game.sequence(), "mirror resynced");
        Ok(())
    }
}
