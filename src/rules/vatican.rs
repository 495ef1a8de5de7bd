//! Vatican reports held at the end of every period.
//!
//! Players below the faith threshold are excommunicated on the spot. The
//! others are queued and each answers once, in any order: keep their faith
//! and take the period's excommunication tile, or give their faith up for
//! victory points and stay in good standing.

use tracing::{debug, info};

use crate::cards::ExcommunicationTile;
use crate::core::{ActionError, ActionResult, ExcommunicationChoice};
use crate::events::GameEvent;
use crate::game::{Game, Phase};
use crate::resources::ResourceType;

impl Game {
    pub(crate) fn open_vatican_report(&mut self, threshold: i32, events: &mut Vec<GameEvent>) {
        let round = self.round;
        let tile = self.excommunication_tile();

        let mut queued = Vec::new();
        for player in &mut self.players {
            if player.faith_points() >= threshold {
                queued.push(player.username.clone());
                continue;
            }
            if let Some(tile) = &tile {
                player.excommunications.push(tile.clone());
            }
            events.push(GameEvent::ExcommunicationDecided {
                player: player.username.clone(),
                excommunicated: true,
                choice: None,
            });
        }

        info!(round, threshold, queued = queued.len(), "vatican report");
        events.push(GameEvent::VaticanReportStarted {
            round,
            threshold,
            queued: queued.clone(),
        });
        self.vatican_queue = queued;
        if self.vatican_queue.is_empty() {
            self.next_round_or_end(events);
        } else {
            self.enter_phase(Phase::VaticanReport, events);
        }
    }

    /// Answer the open Vatican report.
    pub(crate) fn decide_excommunication(
        &mut self,
        username: &str,
        choice: ExcommunicationChoice,
    ) -> ActionResult<Vec<GameEvent>> {
        let seat = self.seat_of(username)?;
        if self.phase != Phase::VaticanReport {
            return Err(ActionError::not_allowed("no vatican report in progress"));
        }
        let position = self
            .vatican_queue
            .iter()
            .position(|name| name == username)
            .ok_or_else(|| ActionError::not_allowed(format!("{username} has nothing to decide")))?;

        let tile = self.excommunication_tile();
        let faith_track = self.config.faith_reward(self.players[seat].faith_points());

        // All checks passed.
        self.vatican_queue.remove(position);
        let player = &mut self.players[seat];
        let excommunicated = match choice {
            ExcommunicationChoice::AcceptExcommunication => {
                if let Some(tile) = tile {
                    player.excommunications.push(tile);
                }
                true
            }
            ExcommunicationChoice::SupportChurch => {
                let faith = player.faith_points();
                player.resources.subtract(ResourceType::FaithPoints, faith);
                player.resources.add(ResourceType::VictoryPoints, faith_track);
                false
            }
        };
        debug!(player = username, ?choice, "excommunication decided");

        let mut events = vec![GameEvent::ExcommunicationDecided {
            player: username.to_string(),
            excommunicated,
            choice: Some(choice),
        }];
        if !excommunicated {
            events.push(GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources: self.players[seat].resources.clone(),
            });
        }
        if self.vatican_queue.is_empty() {
            self.next_round_or_end(&mut events);
        }
        Ok(events)
    }

    fn excommunication_tile(&self) -> Option<ExcommunicationTile> {
        let period = self.period();
        self.excommunications.iter().find(|t| t.period == period).cloned()
    }
}
