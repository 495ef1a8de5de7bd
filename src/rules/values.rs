//! Derived quantities: action values, gains, discounts and turn checks.
//!
//! Every helper here is read-only. Entry points call them while validating
//! and only mutate once all of them have succeeded.

use crate::board::ActionType;
use crate::cards::CardCategory;
use crate::core::{ActionError, ActionResult, FamilyColor};
use crate::effects::{fold_gain, fold_value, Bypass, Capability, ValueTarget};
use crate::game::{Game, Phase, Player};
use crate::resources::{ObtainableResourceSet, ResourceSet};

impl Game {
    /// Reject unless the game is in `phase` and `username` is the current player.
    pub(crate) fn check_turn(&self, username: &str, phase: Phase) -> ActionResult<usize> {
        let seat = self.seat_of(username)?;
        if self.phase != phase {
            return Err(ActionError::not_allowed(format!(
                "expected phase {phase}, game is in phase {}",
                self.phase
            )));
        }
        if seat != self.current {
            return Err(ActionError::not_allowed(format!("it is not {username}'s turn")));
        }
        Ok(seat)
    }

    /// Reject unless `player` can still place `color` this turn.
    pub(crate) fn check_member(player: &Player, color: FamilyColor) -> ActionResult<()> {
        if player.placed_this_turn {
            return Err(ActionError::not_allowed("a family member was already placed this turn"));
        }
        if !player.has_member(color) {
            return Err(ActionError::not_allowed(format!(
                "the {color} family member is not available"
            )));
        }
        Ok(())
    }

    /// Reject if an active effect forbids `action` for `player`.
    pub(crate) fn check_not_inhibited(player: &Player, action: ActionType) -> ActionResult<()> {
        if player
            .effects_implementing(Capability::InhibitSpace)
            .any(|e| e.inhibits(action))
        {
            return Err(ActionError::not_allowed(format!("{action} is forbidden for this player")));
        }
        Ok(())
    }

    /// Value of a family member before action effects.
    pub(crate) fn family_value(&self, player: &Player, color: FamilyColor) -> ActionResult<i32> {
        fold_value(
            self.dice.value(color),
            player.active_effects(),
            ValueTarget::FamilyMember(color),
        )
    }

    /// Value of the action performed by placing `color` on a space of
    /// `action` with the given space penalty, servants included.
    pub(crate) fn action_value(
        &self,
        player: &Player,
        color: FamilyColor,
        action: ActionType,
        penalty: i32,
    ) -> ActionResult<i32> {
        let family = self.family_value(player, color)?;
        let value = fold_value(family, player.active_effects(), ValueTarget::Action(action))?;
        let servants = fold_value(player.spent_servants, player.active_effects(), ValueTarget::Servants)?;
        Ok(value - penalty + servants)
    }

    /// True if any active effect of `player` switches off `bypass`.
    pub(crate) fn bypasses(player: &Player, bypass: Bypass) -> bool {
        player
            .effects_implementing(Capability::Bypass(bypass))
            .next()
            .is_some()
    }

    /// Total discount on cards of `category`.
    pub(crate) fn cost_discount(player: &Player, category: CardCategory) -> ResourceSet {
        let mut discount = ResourceSet::new();
        for effect in player.effects_implementing(Capability::CostModifier) {
            if let Some(d) = effect.cost_discount_for(category) {
                discount.add_set(d);
            }
        }
        discount
    }

    /// Resolve a grant for `player` against their chosen privileges and
    /// fold gain modifiers over the total.
    pub(crate) fn resolve_gain(
        &self,
        player: &Player,
        grant: &ObtainableResourceSet,
        extra: Option<&ResourceSet>,
        chosen: &[ResourceSet],
    ) -> ActionResult<ResourceSet> {
        let obtained = grant.resolve(player);
        let mut total = obtained.resources;
        if let Some(extra) = extra {
            total.add_set(extra);
        }
        total.add_set(&self.privileges.resolve(obtained.council_privileges, chosen)?);
        Ok(fold_gain(&total, player.active_effects()))
    }
}
