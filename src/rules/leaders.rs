//! Playing, discarding and activating leader cards.

use tracing::debug;

use crate::cards::PlayedLeader;
use crate::core::{ActionError, ActionResult};
use crate::events::GameEvent;
use crate::game::{Game, Phase};
use crate::resources::{ObtainableResourceSet, ResourceSet, ResourceType};

impl Game {
    /// Put a leader from hand on the table if its requirement is met.
    pub(crate) fn play_leader(&mut self, username: &str, name: &str) -> ActionResult<Vec<GameEvent>> {
        let seat = self.check_turn(username, Phase::PlayerTurn)?;
        let player = &self.players[seat];
        let leader = player
            .leader_in_hand(name)
            .ok_or_else(|| ActionError::CardNotFound(name.to_string()))?;
        if !leader.requirement.is_satisfied_by(player) {
            return Err(ActionError::not_allowed(format!("requirements of {name} are not met")));
        }

        let player = &mut self.players[seat];
        if let Some(leader) = player.take_leader(name) {
            player.played_leaders.push(PlayedLeader::new(leader));
        }
        debug!(player = username, leader = name, "leader played");
        Ok(vec![GameEvent::LeaderPlayed {
            player: username.to_string(),
            leader: name.to_string(),
        }])
    }

    /// Discard a leader from hand for one council privilege.
    pub(crate) fn discard_leader(
        &mut self,
        username: &str,
        name: &str,
        privileges: &[ResourceSet],
    ) -> ActionResult<Vec<GameEvent>> {
        let seat = self.check_turn(username, Phase::PlayerTurn)?;
        let player = &self.players[seat];
        if player.leader_in_hand(name).is_none() {
            return Err(ActionError::CardNotFound(name.to_string()));
        }
        let grant = ObtainableResourceSet::new().with(ResourceType::CouncilPrivilege, 1);
        let gain = self.resolve_gain(player, &grant, None, privileges)?;

        let player = &mut self.players[seat];
        player.take_leader(name);
        player.resources.add_set(&gain);
        let resources = player.resources.clone();
        debug!(player = username, leader = name, "leader discarded");
        Ok(vec![
            GameEvent::LeaderDiscarded {
                player: username.to_string(),
                leader: name.to_string(),
            },
            GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources,
            },
        ])
    }

    /// Fire a played leader's once-per-round bonus.
    pub(crate) fn activate_leader(
        &mut self,
        username: &str,
        name: &str,
        privileges: &[ResourceSet],
    ) -> ActionResult<Vec<GameEvent>> {
        let seat = self.check_turn(username, Phase::PlayerTurn)?;
        let player = &self.players[seat];
        let played = player
            .played_leader(name)
            .ok_or_else(|| ActionError::CardNotFound(name.to_string()))?;
        let bonus = played
            .card
            .once_per_round
            .as_ref()
            .ok_or_else(|| ActionError::not_allowed(format!("{name} has no once-per-round ability")))?;
        if !played.can_activate(self.round) {
            return Err(ActionError::not_allowed(format!("{name} was already activated this round")));
        }
        let gain = self.resolve_gain(player, bonus, None, privileges)?;

        let round = self.round;
        let player = &mut self.players[seat];
        if let Some(played) = player.played_leader_mut(name) {
            played.mark_activated(round);
        }
        player.resources.add_set(&gain);
        let resources = player.resources.clone();
        debug!(player = username, leader = name, round, "leader activated");
        Ok(vec![
            GameEvent::LeaderActivated {
                player: username.to_string(),
                leader: name.to_string(),
            },
            GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources,
            },
        ])
    }
}
