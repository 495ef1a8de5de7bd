//! Game setup handed over by the configuration loader.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::{DevelopmentCard, ExcommunicationTile, LeaderCard, PersonalBonusTile};
use crate::core::{FamilyColor, RulesConfig, SetupError};
use crate::effects::Effect;
use crate::resources::CouncilPrivileges;

/// Everything a game needs besides its players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub config: RulesConfig,
    pub board: Board,
    /// Development cards of every period.
    pub cards: Vec<DevelopmentCard>,
    /// Leader pool dealt into draft packs.
    pub leaders: Vec<LeaderCard>,
    /// At least one tile per period.
    pub excommunications: Vec<ExcommunicationTile>,
    /// Tiles offered in the bonus tile draft.
    pub bonus_tiles: Vec<PersonalBonusTile>,
    pub privileges: CouncilPrivileges,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            config: RulesConfig::default(),
            board: Board::standard(),
            cards: Vec::new(),
            leaders: Vec::new(),
            excommunications: Vec::new(),
            bonus_tiles: Vec::new(),
            privileges: CouncilPrivileges::standard(),
        }
    }
}

impl GameSetup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = DevelopmentCard>) -> Self {
        self.cards.extend(cards);
        self
    }

    #[must_use]
    pub fn with_leaders(mut self, leaders: impl IntoIterator<Item = LeaderCard>) -> Self {
        self.leaders.extend(leaders);
        self
    }

    #[must_use]
    pub fn with_excommunications(mut self, tiles: impl IntoIterator<Item = ExcommunicationTile>) -> Self {
        self.excommunications.extend(tiles);
        self
    }

    #[must_use]
    pub fn with_bonus_tiles(mut self, tiles: impl IntoIterator<Item = PersonalBonusTile>) -> Self {
        self.bonus_tiles.extend(tiles);
        self
    }

    /// Reject configurations the engine cannot play unambiguously.
    ///
    /// At most one card or leader may set the value of a given family
    /// member color, since two setters could end up active for the same
    /// player with no defined precedence.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.privileges.is_empty() {
            return Err(SetupError::NoCouncilPrivileges);
        }

        let periods = self.config.period_of(self.config.rounds);
        let covered: FxHashSet<u8> = self
            .excommunications
            .iter()
            .map(|t| t.period)
            .filter(|p| (1..=periods).contains(p))
            .collect();
        if covered.len() < usize::from(periods) {
            return Err(SetupError::MissingExcommunications {
                periods,
                found: covered.len(),
            });
        }

        let mut seen_tiles = FxHashSet::default();
        for tile in &self.bonus_tiles {
            if !seen_tiles.insert(tile.id) {
                return Err(SetupError::DuplicateTile(tile.id));
            }
        }
        // Every seat picks a tile, so a full table must not run out.
        if !self.bonus_tiles.is_empty() && self.bonus_tiles.len() < self.config.max_players {
            return Err(SetupError::NotEnoughBonusTiles {
                players: self.config.max_players,
                found: self.bonus_tiles.len(),
            });
        }

        let sources = self
            .cards
            .iter()
            .map(|c| (c.name.as_str(), c.effects.as_slice()))
            .chain(self.leaders.iter().map(|l| (l.name.as_str(), l.effects.as_slice())));

        let mut setters: FxHashMap<FamilyColor, usize> = FxHashMap::default();
        for (name, effects) in sources {
            let mut on_card: FxHashSet<FamilyColor> = FxHashSet::default();
            for effect in effects {
                if let Effect::FamilyValueSetter { colors, .. } = effect {
                    for &color in colors {
                        if !on_card.insert(color) {
                            return Err(SetupError::DuplicateSetterOnCard {
                                card: name.to_string(),
                                color,
                            });
                        }
                    }
                }
            }
            for color in on_card {
                *setters.entry(color).or_insert(0) += 1;
            }
        }

        for color in FamilyColor::ALL {
            let count = setters.get(&color).copied().unwrap_or(0);
            if count > 1 {
                return Err(SetupError::MultipleSetters { color, count });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    fn tiles() -> Vec<ExcommunicationTile> {
        (1..=3).map(|period| ExcommunicationTile::new(u32::from(period), period)).collect()
    }

    #[test]
    fn test_valid_setup() {
        let setup = GameSetup::new().with_excommunications(tiles());
        assert_eq!(setup.validate(), Ok(()));
    }

    #[test]
    fn test_missing_excommunications() {
        let setup = GameSetup::new().with_excommunications(tiles().into_iter().take(2));
        assert_eq!(
            setup.validate(),
            Err(SetupError::MissingExcommunications { periods: 3, found: 2 })
        );
    }

    #[test]
    fn test_two_leaders_setting_same_color() {
        let setup = GameSetup::new().with_excommunications(tiles()).with_leaders([
            LeaderCard::new("Duke").with_effect(Effect::family_setter(&[FamilyColor::Black], 6)),
            LeaderCard::new("Moro").with_effect(Effect::family_setter(&FamilyColor::COLORED, 5)),
        ]);
        assert_eq!(
            setup.validate(),
            Err(SetupError::MultipleSetters {
                color: FamilyColor::Black,
                count: 2
            })
        );
    }

    #[test]
    fn test_setters_on_different_colors_allowed() {
        let setup = GameSetup::new().with_excommunications(tiles()).with_leaders([
            LeaderCard::new("Duke").with_effect(Effect::family_setter(&[FamilyColor::Black], 6)),
            LeaderCard::new("Count").with_effect(Effect::family_setter(&[FamilyColor::White], 6)),
        ]);
        assert_eq!(setup.validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_setter_on_one_card() {
        let setup = GameSetup::new().with_excommunications(tiles()).with_leaders([LeaderCard::new("Duke")
            .with_effect(Effect::family_setter(&[FamilyColor::Orange], 6))
            .with_effect(Effect::family_setter(&[FamilyColor::Orange], 4))]);
        assert!(matches!(
            setup.validate(),
            Err(SetupError::DuplicateSetterOnCard { .. })
        ));
    }

    #[test]
    fn test_duplicate_bonus_tiles() {
        let tile = PersonalBonusTile::new(1, Default::default(), Default::default());
        let setup = GameSetup::new()
            .with_excommunications(tiles())
            .with_bonus_tiles([tile.clone(), tile]);
        assert_eq!(setup.validate(), Err(SetupError::DuplicateTile(1)));
    }

    #[test]
    fn test_bonus_tiles_cover_a_full_table() {
        let bonus = |count: u32| (0..count).map(|id| PersonalBonusTile::new(id, Default::default(), Default::default()));
        let short = GameSetup::new().with_excommunications(tiles()).with_bonus_tiles(bonus(1));
        assert_eq!(
            short.validate(),
            Err(SetupError::NotEnoughBonusTiles { players: 4, found: 1 })
        );
        assert!(matches!(Game::new(short, 1), Err(SetupError::NotEnoughBonusTiles { .. })));

        let full = GameSetup::new().with_excommunications(tiles()).with_bonus_tiles(bonus(4));
        assert_eq!(full.validate(), Ok(()));
    }
}
