//! Production and harvest: activating owned cards.

use tracing::debug;

use crate::board::ActionType;
use crate::cards::CardCategory;
use crate::core::{ActionError, ActionResult};
use crate::events::GameEvent;
use crate::game::{Game, Phase};
use crate::resources::ResourceSet;

impl Game {
    fn activation_phase(&self) -> ActionResult<Phase> {
        match self.phase {
            Phase::Production | Phase::Harvest => Ok(self.phase),
            other => Err(ActionError::not_allowed(format!(
                "no production or harvest in progress (phase {other})"
            ))),
        }
    }

    /// Activate one owned card during a production or harvest.
    ///
    /// Buildings produce, territories harvest. Each card fires at most once
    /// per entry, and only if the entry value reaches its activation value.
    pub(crate) fn activate_card(
        &mut self,
        username: &str,
        name: &str,
        conversion: Option<usize>,
        privileges: &[ResourceSet],
    ) -> ActionResult<Vec<GameEvent>> {
        let phase = self.activation_phase()?;
        let seat = self.check_turn(username, phase)?;
        let activation = self
            .activation
            .as_ref()
            .ok_or_else(|| ActionError::not_allowed("no production or harvest in progress"))?;

        let category = match activation.action {
            ActionType::Production => CardCategory::Building,
            _ => CardCategory::Territory,
        };
        let player = &self.players[seat];
        let card = player
            .card(category, name)
            .ok_or_else(|| ActionError::CardNotFound(name.to_string()))?;
        if activation.activated.iter().any(|n| n == name) {
            return Err(ActionError::not_allowed(format!("{name} was already activated")));
        }
        let (min_value, conversions) = card
            .activation(activation.action)
            .ok_or_else(|| ActionError::not_allowed(format!("{name} has no {} effect", activation.action)))?;
        if activation.value < min_value {
            return Err(ActionError::not_allowed(format!(
                "{name} needs value {min_value}, the {} was entered with {}",
                activation.action, activation.value
            )));
        }

        let index = match (conversion, conversions.len()) {
            (Some(index), _) => index,
            (None, 1) => 0,
            (None, _) => return Err(ActionError::not_allowed(format!("choose a conversion of {name}"))),
        };
        let chosen = conversions
            .get(index)
            .ok_or_else(|| ActionError::not_allowed(format!("{name} has no conversion {index}")))?;
        if !player.resources.covers(&chosen.cost) {
            return Err(ActionError::not_allowed(format!("cannot pay {} to activate {name}", chosen.cost)));
        }
        let cost = chosen.cost.clone();
        let gain = self.resolve_gain(player, &chosen.gain, None, privileges)?;

        // All checks passed.
        let player = &mut self.players[seat];
        player.resources.subtract_set(&cost);
        player.resources.add_set(&gain);
        let resources = player.resources.clone();
        if let Some(activation) = self.activation.as_mut() {
            activation.activated.push(name.to_string());
        }

        debug!(player = username, card = name, "card activated");
        Ok(vec![
            GameEvent::CardActivated {
                player: username.to_string(),
                card: name.to_string(),
            },
            GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources,
            },
        ])
    }

    /// Close the production or harvest and go back to the turn.
    pub(crate) fn finish_activation(&mut self, username: &str) -> ActionResult<Vec<GameEvent>> {
        let phase = self.activation_phase()?;
        self.check_turn(username, phase)?;

        self.activation = None;
        let mut events = Vec::new();
        self.enter_phase(Phase::PlayerTurn, &mut events);
        Ok(events)
    }
}
