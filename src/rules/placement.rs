//! Placing family members on tower floors and action spaces.
//!
//! Both entry points run the same pipeline: turn and member checks, action
//! value, occupancy, costs, and only then mutation. A rejected placement
//! leaves the game exactly as it was.

use tracing::debug;

use crate::board::{ActionType, Occupant, SpaceId};
use crate::cards::{CardCategory, CostAlternative};
use crate::core::{ActionError, ActionResult, FamilyColor};
use crate::effects::{fold_gain, Bypass, Capability};
use crate::events::{GameEvent, Placement};
use crate::game::{Activation, Game, PendingCard, Phase, Player};
use crate::resources::{ResourceSet, ResourceType};

impl Game {
    /// Spend servants to raise the value of this turn's placement.
    pub(crate) fn spend_servants(&mut self, username: &str, amount: i32) -> ActionResult<Vec<GameEvent>> {
        let seat = self.check_turn(username, Phase::PlayerTurn)?;
        let player = &self.players[seat];
        if amount <= 0 {
            return Err(ActionError::not_allowed("servants spent must be positive"));
        }
        if player.placed_this_turn {
            return Err(ActionError::not_allowed("a family member was already placed this turn"));
        }
        if !player.resources.has_at_least(amount, ResourceType::Servants) {
            return Err(ActionError::not_allowed(format!("not enough servants to spend {amount}")));
        }

        let player = &mut self.players[seat];
        player.resources.subtract(ResourceType::Servants, amount);
        player.spent_servants += amount;
        Ok(vec![
            GameEvent::ServantsSpent {
                player: username.to_string(),
                amount,
            },
            GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources: player.resources.clone(),
            },
        ])
    }

    /// Occupy a tower floor and stage its card for `take_card`.
    pub(crate) fn go_to_floor(
        &mut self,
        username: &str,
        category: CardCategory,
        floor: usize,
        color: FamilyColor,
        cost: Option<usize>,
    ) -> ActionResult<Vec<GameEvent>> {
        let seat = self.check_turn(username, Phase::PlayerTurn)?;
        let player = &self.players[seat];
        Self::check_member(player, color)?;

        let action = ActionType::Tower(category);
        Self::check_not_inhibited(player, action)?;

        let tower = self
            .board
            .tower(category)
            .ok_or_else(|| ActionError::not_allowed(format!("no {category} tower")))?;
        let target = tower
            .floor(floor)
            .ok_or_else(|| ActionError::not_allowed(format!("no floor {floor} in the {category} tower")))?;

        let value = self.action_value(player, color, action, 0)?;
        if value < target.required_value {
            return Err(ActionError::not_allowed(format!(
                "action value {value} is below the required {}",
                target.required_value
            )));
        }

        if !target.occupancy.is_empty() && !Self::bypasses(player, Bypass::OccupationCheck) {
            return Err(ActionError::not_allowed("the floor is already occupied"));
        }
        if color.is_colored() && tower.has_colored_member_of(username) {
            return Err(ActionError::not_allowed(format!(
                "{username} already has a colored family member in the {category} tower"
            )));
        }

        let occupation_cost = if tower.is_occupied() && !Self::bypasses(player, Bypass::DoubleOccupationCost) {
            self.config.double_occupation_cost.clone()
        } else {
            ResourceSet::new()
        };

        let card = target
            .card
            .as_ref()
            .ok_or_else(|| ActionError::CardNotFound(format!("floor {floor} of the {category} tower")))?;
        let owned = player.cards(category).len();
        if owned >= self.config.max_cards_per_category {
            return Err(ActionError::not_allowed(format!(
                "{username} already owns {owned} {category} cards"
            )));
        }
        if category == CardCategory::Territory && !Self::bypasses(player, Bypass::MilitaryRequirement) {
            let needed = self.config.military_requirement(owned);
            if player.military_points() < needed {
                return Err(ActionError::not_allowed(format!(
                    "{needed} military points needed for another territory, {username} has {}",
                    player.military_points()
                )));
            }
        }

        let discount = Self::cost_discount(player, category);
        let alternatives: Vec<CostAlternative> = card
            .cost_alternatives()
            .iter()
            .map(|c| c.discounted(&discount))
            .collect();
        let payment = Self::choose_payment(player, &alternatives, &occupation_cost, cost)?;

        let bonus = player
            .effects_implementing(Capability::FloorBonusOverride)
            .find_map(|e| e.floor_bonus_for(action))
            .unwrap_or(&target.bonus);
        let bonus = fold_gain(bonus, player.active_effects());
        let card_name = card.name.clone();

        // All checks passed.
        let player = &mut self.players[seat];
        player.resources.subtract_set(&occupation_cost);
        player.resources.subtract_set(&payment);
        player.resources.add_set(&bonus);
        player.use_member(color);
        player.placed_this_turn = true;
        let resources = player.resources.clone();
        if let Some(tower) = self.board.tower_mut(category) {
            tower.occupy(floor, Occupant::new(username, color));
        }
        self.pending_card = Some(PendingCard { category, floor });

        debug!(player = username, %category, floor, card = %card_name, value, "floor occupied");
        let mut events = vec![
            GameEvent::SpaceOccupied {
                player: username.to_string(),
                color,
                placement: Placement::Floor { category, floor },
            },
            GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources,
            },
        ];
        self.enter_phase(Phase::TakingCard, &mut events);
        Ok(events)
    }

    /// Pick the payment among cost alternatives.
    ///
    /// An explicit choice must be affordable; otherwise the first affordable
    /// alternative is used. The occupation cost must be covered on top.
    fn choose_payment(
        player: &Player,
        alternatives: &[CostAlternative],
        occupation_cost: &ResourceSet,
        choice: Option<usize>,
    ) -> ActionResult<ResourceSet> {
        let affordable = |alternative: &CostAlternative| {
            let mut total = alternative.payment.clone();
            total.add_set(occupation_cost);
            alternative.requirement.is_satisfied_by(player) && player.resources.covers(&total)
        };

        match choice {
            Some(index) => {
                let alternative = alternatives
                    .get(index)
                    .ok_or_else(|| ActionError::not_allowed(format!("no cost alternative {index}")))?;
                if !affordable(alternative) {
                    return Err(ActionError::not_allowed(format!(
                        "cannot pay {} for this card",
                        alternative.payment
                    )));
                }
                Ok(alternative.payment.clone())
            }
            None => alternatives
                .iter()
                .find(|a| affordable(a))
                .map(|a| a.payment.clone())
                .ok_or_else(|| ActionError::not_allowed("no affordable cost alternative")),
        }
    }

    /// Occupy a market, production, harvest or council palace space.
    pub(crate) fn go_to_space(
        &mut self,
        username: &str,
        space: SpaceId,
        color: FamilyColor,
        privileges: &[ResourceSet],
    ) -> ActionResult<Vec<GameEvent>> {
        let seat = self.check_turn(username, Phase::PlayerTurn)?;
        let player = &self.players[seat];
        Self::check_member(player, color)?;

        let target = self
            .board
            .space(space)
            .filter(|s| s.enabled)
            .ok_or_else(|| ActionError::not_allowed(format!("the {space} is not available")))?;
        let action = target.action_type();
        Self::check_not_inhibited(player, action)?;

        let value = self.action_value(player, color, action, target.value_penalty)?;
        if value < target.required_value {
            return Err(ActionError::not_allowed(format!(
                "action value {value} is below the required {}",
                target.required_value
            )));
        }

        if target.is_full() && !Self::bypasses(player, Bypass::OccupationCheck) {
            return Err(ActionError::not_allowed(format!("the {space} is already occupied")));
        }
        if color.is_colored() && self.board.area_has_colored_member_of(action, username) {
            return Err(ActionError::not_allowed(format!(
                "{username} already has a colored family member in the {action} area"
            )));
        }

        let tile_yield = match action {
            ActionType::Production | ActionType::Harvest => {
                player.bonus_tile.as_ref().and_then(|t| t.yield_for(action))
            }
            _ => None,
        };
        let gain = self.resolve_gain(player, &target.bonus, tile_yield, privileges)?;

        // All checks passed.
        let player = &mut self.players[seat];
        player.resources.add_set(&gain);
        player.use_member(color);
        player.placed_this_turn = true;
        let resources = player.resources.clone();
        if let Some(target) = self.board.space_mut(space) {
            target.occupy(Occupant::new(username, color));
        }

        debug!(player = username, %space, value, "space occupied");
        let mut events = vec![
            GameEvent::SpaceOccupied {
                player: username.to_string(),
                color,
                placement: Placement::Space(space),
            },
            GameEvent::ResourcesChanged {
                player: username.to_string(),
                resources,
            },
        ];

        let phase = match action {
            ActionType::Production => Some(Phase::Production),
            ActionType::Harvest => Some(Phase::Harvest),
            _ => None,
        };
        if let Some(phase) = phase {
            self.activation = Some(Activation {
                action,
                value,
                activated: Vec::new(),
            });
            self.enter_phase(phase, &mut events);
        }
        Ok(events)
    }
}
