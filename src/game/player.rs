//! Per-player state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{
    CardCategory, DevelopmentCard, ExcommunicationTile, LeaderCard, PersonalBonusTile, PlayedLeader,
};
use crate::core::FamilyColor;
use crate::effects::{Capability, Effect};
use crate::resources::{RequirementSource, ResourceSet, ResourceType};

/// Pawn color assigned when the game starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Blue,
    Green,
    Red,
    Yellow,
}

impl PlayerColor {
    /// Colors in seat order.
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Red,
        PlayerColor::Yellow,
    ];
}

/// A seated player.
///
/// The username is the unique key. Everything else is reset or changed
/// only by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub color: Option<PlayerColor>,
    pub resources: ResourceSet,
    /// Leader cards still in hand.
    pub leaders: Vec<LeaderCard>,
    pub played_leaders: Vec<PlayedLeader>,
    /// Owned development cards, one list per category.
    cards: [Vec<DevelopmentCard>; 4],
    /// Family members not yet placed this round.
    pub available_members: SmallVec<[FamilyColor; 4]>,
    /// Servants spent on this turn's placement.
    pub spent_servants: i32,
    /// A family member was placed this turn.
    pub placed_this_turn: bool,
    pub excommunications: Vec<ExcommunicationTile>,
    pub bonus_tile: Option<PersonalBonusTile>,
}

impl Player {
    /// A fresh player with no resources and all family members available.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            color: None,
            resources: ResourceSet::new(),
            leaders: Vec::new(),
            played_leaders: Vec::new(),
            cards: Default::default(),
            available_members: SmallVec::from_slice(&FamilyColor::ALL),
            spent_servants: 0,
            placed_this_turn: false,
            excommunications: Vec::new(),
            bonus_tile: None,
        }
    }

    /// Owned cards of a category, in acquisition order.
    #[must_use]
    pub fn cards(&self, category: CardCategory) -> &[DevelopmentCard] {
        &self.cards[category.index()]
    }

    /// Find an owned card by name.
    #[must_use]
    pub fn card(&self, category: CardCategory, name: &str) -> Option<&DevelopmentCard> {
        self.cards(category).iter().find(|c| c.name == name)
    }

    /// Add a card to the owned set.
    pub fn add_card(&mut self, card: DevelopmentCard) {
        self.cards[card.category.index()].push(card);
    }

    /// Every owned card, category by category.
    pub fn all_cards(&self) -> impl Iterator<Item = &DevelopmentCard> {
        self.cards.iter().flatten()
    }

    #[must_use]
    pub fn has_member(&self, color: FamilyColor) -> bool {
        self.available_members.contains(&color)
    }

    /// Mark a family member as placed for the rest of the round.
    pub fn use_member(&mut self, color: FamilyColor) {
        self.available_members.retain(|c| *c != color);
    }

    /// Start-of-round reset.
    pub fn reset_members(&mut self) {
        self.available_members = SmallVec::from_slice(&FamilyColor::ALL);
    }

    /// Start-of-turn reset.
    pub fn reset_turn(&mut self) {
        self.spent_servants = 0;
        self.placed_this_turn = false;
    }

    /// Leader in hand.
    #[must_use]
    pub fn leader_in_hand(&self, name: &str) -> Option<&LeaderCard> {
        self.leaders.iter().find(|l| l.name == name)
    }

    /// Leader on the table.
    #[must_use]
    pub fn played_leader(&self, name: &str) -> Option<&PlayedLeader> {
        self.played_leaders.iter().find(|l| l.card.name == name)
    }

    pub fn played_leader_mut(&mut self, name: &str) -> Option<&mut PlayedLeader> {
        self.played_leaders.iter_mut().find(|l| l.card.name == name)
    }

    /// Remove a leader from hand.
    pub fn take_leader(&mut self, name: &str) -> Option<LeaderCard> {
        let index = self.leaders.iter().position(|l| l.name == name)?;
        Some(self.leaders.remove(index))
    }

    /// True if the player holds the excommunication of `period`.
    #[must_use]
    pub fn is_excommunicated_in(&self, period: u8) -> bool {
        self.excommunications.iter().any(|t| t.period == period)
    }

    /// Active effects in scan order: excommunications, played leaders,
    /// then development cards by category.
    pub fn active_effects(&self) -> impl Iterator<Item = &Effect> + '_ {
        let excommunications = self.excommunications.iter().flat_map(|t| t.effects.iter());
        let leaders = self.played_leaders.iter().flat_map(|l| l.card.effects.iter());
        let cards = self.all_cards().flat_map(|c| c.effects.iter());
        excommunications.chain(leaders).chain(cards)
    }

    /// Active effects implementing `capability`, in scan order.
    pub fn effects_implementing(&self, capability: Capability) -> impl Iterator<Item = &Effect> + '_ {
        self.active_effects().filter(move |e| e.implements(capability))
    }

    /// Active effects paired with the category of the card carrying them.
    ///
    /// Effects from excommunications and leaders have no category.
    pub fn sourced_effects(&self) -> impl Iterator<Item = (Option<CardCategory>, &Effect)> + '_ {
        let excommunications = self
            .excommunications
            .iter()
            .flat_map(|t| t.effects.iter().map(|e| (None, e)));
        let leaders = self
            .played_leaders
            .iter()
            .flat_map(|l| l.card.effects.iter().map(|e| (None, e)));
        let cards = self
            .all_cards()
            .flat_map(|c| c.effects.iter().map(move |e| (Some(c.category), e)));
        excommunications.chain(leaders).chain(cards)
    }

    #[must_use]
    pub fn military_points(&self) -> i32 {
        self.resources.get(ResourceType::MilitaryPoints)
    }

    #[must_use]
    pub fn faith_points(&self) -> i32 {
        self.resources.get(ResourceType::FaithPoints)
    }

    #[must_use]
    pub fn victory_points(&self) -> i32 {
        self.resources.get(ResourceType::VictoryPoints)
    }
}

impl RequirementSource for Player {
    fn held(&self, resource: ResourceType) -> i32 {
        self.resources.get(resource)
    }

    fn card_count(&self, category: CardCategory) -> usize {
        self.cards(category).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ActionScope;
    use crate::effects::{Bypass, ValueTarget};
    use crate::resources::{RequiredResourceSet, RequirementKey};

    #[test]
    fn test_members() {
        let mut player = Player::new("anna");
        assert!(player.has_member(FamilyColor::Neutral));

        player.use_member(FamilyColor::White);
        assert!(!player.has_member(FamilyColor::White));
        assert_eq!(player.available_members.len(), 3);

        player.reset_members();
        assert!(player.has_member(FamilyColor::White));
    }

    #[test]
    fn test_card_counts_as_requirement_source() {
        let mut player = Player::new("anna");
        for name in ["Forest", "Quarry", "Vineyard"] {
            player.add_card(DevelopmentCard::new(name, CardCategory::Territory, 1));
        }
        player.add_card(DevelopmentCard::new("Bishop", CardCategory::Character, 1));

        assert_eq!(player.card_count(CardCategory::Territory), 3);
        let req = RequiredResourceSet::new().with(RequirementKey::MaxCardCount, 3);
        assert!(req.is_satisfied_by(&player));
        assert!(player.card(CardCategory::Territory, "Quarry").is_some());
    }

    #[test]
    fn test_effect_scan_order() {
        let mut player = Player::new("anna");
        player.add_card(
            DevelopmentCard::new("Bishop", CardCategory::Character, 1)
                .with_effect(Effect::family_modifier(&[FamilyColor::Black], 1)),
        );
        player.played_leaders.push(PlayedLeader::new(
            LeaderCard::new("Duke").with_effect(Effect::family_modifier(&[FamilyColor::Black], 2)),
        ));
        player.excommunications.push(
            ExcommunicationTile::new(1, 1).with_effect(Effect::family_modifier(&[FamilyColor::Black], -1)),
        );

        let target = ValueTarget::FamilyMember(FamilyColor::Black);
        let deltas: Vec<_> = player.active_effects().filter_map(|e| e.modifier_for(target)).collect();
        assert_eq!(deltas, vec![-1, 2, 1]);

        let sources: Vec<_> = player.sourced_effects().map(|(c, _)| c).collect();
        assert_eq!(sources, vec![None, None, Some(CardCategory::Character)]);
    }

    #[test]
    fn test_effects_by_capability() {
        let mut player = Player::new("anna");
        player.add_card(
            DevelopmentCard::new("Preacher", CardCategory::Character, 1)
                .with_effect(Effect::InhibitSpace(ActionScope::AnyTower))
                .with_effect(Effect::family_modifier(&[FamilyColor::White], 1)),
        );
        player.played_leaders.push(PlayedLeader::new(
            LeaderCard::new("Ariosto").with_effect(Effect::OccupationCheckBypass),
        ));

        let bypasses: Vec<_> = player
            .effects_implementing(Capability::Bypass(Bypass::OccupationCheck))
            .collect();
        assert_eq!(bypasses, vec![&Effect::OccupationCheckBypass]);
        assert_eq!(player.effects_implementing(Capability::InhibitSpace).count(), 1);
        assert_eq!(player.effects_implementing(Capability::ValueModifier).count(), 1);
        assert_eq!(player.effects_implementing(Capability::ValueSetter).count(), 0);
    }

    #[test]
    fn test_take_leader() {
        let mut player = Player::new("anna");
        player.leaders.push(LeaderCard::new("Duke"));
        assert!(player.take_leader("Bishop").is_none());
        assert_eq!(player.take_leader("Duke").unwrap().name, "Duke");
        assert!(player.leaders.is_empty());
    }
}
