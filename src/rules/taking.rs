//! Second step of a floor placement: taking the staged card.

use tracing::debug;

use crate::core::{ActionError, ActionResult};
use crate::effects::fold_gain;
use crate::events::GameEvent;
use crate::game::{Game, Phase};
use crate::resources::{ObtainedResourceSet, ResourceSet};

impl Game {
    /// Take the card of the floor entered by `go_to_floor`.
    ///
    /// Immediate grants are resolved with the card already owned, so a card
    /// counting its own category includes itself.
    pub(crate) fn take_card(&mut self, username: &str, privileges: &[ResourceSet]) -> ActionResult<Vec<GameEvent>> {
        let seat = self.check_turn(username, Phase::TakingCard)?;
        let pending = self
            .pending_card
            .ok_or_else(|| ActionError::not_allowed("no card is being taken"))?;
        let card = self
            .board
            .floor(pending.category, pending.floor)
            .and_then(|f| f.card.clone())
            .ok_or_else(|| ActionError::CardNotFound(format!("floor {} of the {} tower", pending.floor, pending.category)))?;

        let mut owner = self.players[seat].clone();
        owner.add_card(card.clone());

        let mut obtained = ObtainedResourceSet::default();
        for grant in card.immediate_grants() {
            obtained.merge(&grant.resolve(&owner));
        }
        let mut gain = obtained.resources;
        gain.add_set(&self.privileges.resolve(obtained.council_privileges, privileges)?);
        let gain = fold_gain(&gain, owner.active_effects());
        owner.resources.add_set(&gain);

        // All checks passed.
        let resources = owner.resources.clone();
        self.players[seat] = owner;
        if let Some(floor) = self
            .board
            .tower_mut(pending.category)
            .and_then(|t| t.floor_mut(pending.floor))
        {
            floor.card = None;
        }
        self.pending_card = None;

        debug!(player = username, card = %card.name, "development card taken");
        let mut events = vec![
            GameEvent::DevelopmentCardTaken {
                player: username.to_string(),
                card: card.name,
            },
            GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources,
            },
        ];
        self.enter_phase(Phase::PlayerTurn, &mut events);
        Ok(events)
    }
}
