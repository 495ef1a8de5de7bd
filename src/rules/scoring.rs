//! End-of-game scoring.

use tracing::info;

use crate::cards::CardCategory;
use crate::effects::{Capability, Effect};
use crate::events::GameEvent;
use crate::game::{Game, Phase, Player};
use crate::resources::{ResourceSet, ResourceType};

/// Resources converted into victory points at the end of the game.
const GOODS: [ResourceType; 4] = [
    ResourceType::Wood,
    ResourceType::Stone,
    ResourceType::Gold,
    ResourceType::Servants,
];

impl Game {
    /// Final victory points of every player, in turn order.
    ///
    /// Scoring does not mutate the game; it can be called at any time to
    /// preview the standings.
    #[must_use]
    pub fn scores(&self) -> Vec<(String, i32)> {
        let (top, second) = self.military_tiers();
        let (first_bonus, second_bonus) = self.config.military_ranking_bonus;

        self.players
            .iter()
            .map(|player| {
                let military = player.military_points();
                let ranking = if Some(military) == top {
                    first_bonus
                } else if Some(military) == second {
                    second_bonus
                } else {
                    0
                };
                (player.username.clone(), self.player_score(player) + ranking)
            })
            .collect()
    }

    /// Score of one player, military ranking excluded.
    fn player_score(&self, player: &Player) -> i32 {
        let ignored = |category: CardCategory| {
            player
                .effects_implementing(Capability::IgnoreFinalScore)
                .any(|e| e.ignores_final_score(category))
        };

        let mut resources = player.resources.clone();
        let mut penalty = ResourceSet::new();
        for (source, effect) in player.sourced_effects() {
            match effect {
                Effect::EndOfGameResources(grant) if !source.is_some_and(ignored) => {
                    resources.add_set(&grant.resolve(player).resources);
                }
                Effect::EndOfGamePenalty(multiplier) => penalty.add_set(&multiplier.resolve(player)),
                _ => {}
            }
        }
        let resources = resources.saturating_sub(&penalty);

        let per_point = self.config.resources_per_victory_point.max(1);
        let mut score = resources.get(ResourceType::VictoryPoints) + resources.sum_of(&GOODS) / per_point;
        if !ignored(CardCategory::Territory) {
            score += self.config.territory_score(player.cards(CardCategory::Territory).len());
        }
        if !ignored(CardCategory::Character) {
            score += self.config.character_score(player.cards(CardCategory::Character).len());
        }
        score
    }

    /// Highest and second-highest distinct military totals.
    fn military_tiers(&self) -> (Option<i32>, Option<i32>) {
        let mut totals: Vec<i32> = self.players.iter().map(Player::military_points).collect();
        totals.sort_unstable_by(|a, b| b.cmp(a));
        totals.dedup();
        (totals.first().copied(), totals.get(1).copied())
    }

    pub(crate) fn end_game(&mut self, events: &mut Vec<GameEvent>) {
        let scores = self.scores();
        info!(?scores, "game ended");
        self.final_scores = Some(scores.clone());
        self.enter_phase(Phase::GameEnded, events);
        events.push(GameEvent::GameEnded { scores });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{DevelopmentCard, ExcommunicationTile};
    use crate::game::GameSetup;
    use crate::resources::{ObtainableResourceSet, RequiredResourceSet, ResourceMultiplier};

    fn game(players: &[&str]) -> Game {
        let setup = GameSetup::new()
            .with_excommunications((1..=3).map(|p| ExcommunicationTile::new(u32::from(p), p)));
        let mut game = Game::new(setup, 1).unwrap();
        for name in players {
            game.join(name).unwrap();
        }
        for player in &mut game.players {
            player.resources = ResourceSet::new();
        }
        game
    }

    fn score_of(game: &Game, name: &str) -> i32 {
        game.scores()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
            .unwrap()
    }

    #[test]
    fn test_territory_table() {
        let mut game = game(&["anna"]);
        for i in 0..4 {
            game.players[0].add_card(DevelopmentCard::new(format!("Territory {i}"), CardCategory::Territory, 1));
        }
        // Alone at the top of the military ranking.
        assert_eq!(score_of(&game, "anna"), 4 + 5);
    }

    #[test]
    fn test_goods_round_down() {
        let mut game = game(&["anna"]);
        game.players[0].resources = ResourceSet::new()
            .with(ResourceType::Wood, 3)
            .with(ResourceType::Stone, 3)
            .with(ResourceType::Gold, 3)
            .with(ResourceType::Servants, 2)
            .with(ResourceType::VictoryPoints, 10);
        assert_eq!(score_of(&game, "anna"), 10 + 2 + 5);
    }

    #[test]
    fn test_military_ranking_ties() {
        let mut game = game(&["anna", "bruno", "carla", "dario"]);
        for (player, military) in game.players.iter_mut().zip([8, 8, 4, 1]) {
            player.resources.add(ResourceType::MilitaryPoints, military);
        }
        let scores = game.scores();
        assert_eq!(
            scores.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
            vec![5, 5, 2, 0]
        );
    }

    #[test]
    fn test_ignored_category_and_penalty() {
        let mut game = game(&["anna"]);
        let anna = &mut game.players[0];
        anna.add_card(
            DevelopmentCard::new("Crusade", CardCategory::Venture, 1)
                .with_effect(Effect::end_of_game(ObtainableResourceSet::new().with(ResourceType::VictoryPoints, 6))),
        );
        anna.add_card(DevelopmentCard::new("Herald", CardCategory::Character, 1));
        anna.resources.add(ResourceType::VictoryPoints, 7);
        anna.resources.add(ResourceType::MilitaryPoints, 3);
        assert_eq!(score_of(&game, "anna"), 7 + 6 + 1 + 5);

        game.players[0].excommunications.push(
            ExcommunicationTile::new(9, 3)
                .with_effect(Effect::IgnoreFinalScore(CardCategory::Venture))
                .with_effect(Effect::EndOfGamePenalty(ResourceMultiplier::new(
                    RequiredResourceSet::new().resource(ResourceType::MilitaryPoints, 1),
                    ResourceSet::new().with(ResourceType::VictoryPoints, 1),
                ))),
        );
        assert_eq!(score_of(&game, "anna"), 7 - 3 + 1 + 5);
    }

    #[test]
    fn test_end_game_records_scores() {
        let mut game = game(&["anna", "bruno"]);
        let mut events = Vec::new();
        game.end_game(&mut events);
        assert_eq!(game.phase, Phase::GameEnded);
        assert_eq!(game.final_scores.as_ref().unwrap().len(), 2);
        assert!(matches!(events.last(), Some(GameEvent::GameEnded { .. })));
    }
}
