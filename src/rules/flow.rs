//! Game flow: joining, starting, rounds and turns.

use tracing::{debug, info};

use crate::cards::CardCategory;
use crate::core::{ActionError, ActionResult, Dice};
use crate::events::GameEvent;
use crate::game::{Game, Phase, Player, PlayerColor};
use crate::resources::ResourceType;

/// Cards dealt to every tower at the start of a round.
const CARDS_PER_TOWER: usize = 4;

impl Game {
    /// Move to `phase` and report it.
    pub(crate) fn enter_phase(&mut self, phase: Phase, events: &mut Vec<GameEvent>) {
        debug!(from = %self.phase, to = %phase, "phase change");
        self.phase = phase;
        events.push(GameEvent::PhaseChanged { phase });
    }

    /// Seat a player. Only while waiting for players.
    pub fn join(&mut self, username: &str) -> ActionResult<Vec<GameEvent>> {
        if self.phase != Phase::WaitingForPlayers {
            return Err(ActionError::not_allowed("the game has already started"));
        }
        if self.players.len() >= self.config.max_players {
            return Err(ActionError::not_allowed("the game is full"));
        }
        if self.player(username).is_some() {
            return Err(ActionError::not_allowed(format!("{username} is already seated")));
        }

        self.players.push(Player::new(username));
        info!(player = username, seated = self.players.len(), "player joined");
        Ok(vec![GameEvent::PlayerJoined {
            player: username.to_string(),
        }])
    }

    /// Start the game with the seated players.
    ///
    /// Assigns colors and starting resources by seat, enables the spaces the
    /// player count allows, shuffles the decks, then opens the drafts (or the
    /// first round when nothing is to be drafted).
    pub fn start(&mut self) -> ActionResult<Vec<GameEvent>> {
        if self.phase != Phase::WaitingForPlayers {
            return Err(ActionError::not_allowed("the game has already started"));
        }
        let count = self.players.len();
        if count < self.config.min_players || count > self.config.max_players {
            return Err(ActionError::not_allowed(format!(
                "{count} players seated, need {} to {}",
                self.config.min_players, self.config.max_players
            )));
        }

        for (seat, player) in self.players.iter_mut().enumerate() {
            player.color = PlayerColor::ALL.get(seat).copied();
            player.resources = self.config.starting_resources.clone();
            player
                .resources
                .add(ResourceType::Gold, self.config.starting_gold_for(seat));
        }
        self.board.enable_for(count);
        self.deck.shuffle(&mut self.rng);
        self.rng.shuffle(&mut self.leader_pool);

        info!(players = count, seed = self.rng.seed(), "game started");
        let mut events = Vec::new();
        self.enter_phase(Phase::Started, &mut events);
        events.push(GameEvent::TurnOrderChanged {
            order: self.turn_order(),
        });
        self.open_tile_draft(&mut events);
        Ok(events)
    }

    /// Deal cards, throw dice, reset members and reorder turns for `round`.
    pub(crate) fn start_round(&mut self, round: u8, events: &mut Vec<GameEvent>) {
        self.round = round;
        let period = self.config.period_of(round);
        info!(round, period, "round started");
        events.push(GameEvent::RoundStarted { round, period });

        self.reorder_from_council(events);
        self.board.clear_occupancy();

        for category in CardCategory::ALL {
            let cards = self.deck.draw(category, period, CARDS_PER_TOWER);
            let names = cards.iter().map(|c| c.name.clone()).collect();
            if let Some(tower) = self.board.tower_mut(category) {
                tower.deal(cards);
            }
            events.push(GameEvent::CardsDrawn { category, cards: names });
        }

        self.dice = Dice::throw(&mut self.rng);
        events.push(GameEvent::DiceThrown { dice: self.dice });

        for player in &mut self.players {
            player.reset_members();
            player.reset_turn();
        }
        self.turns_taken = 0;
        self.current = 0;
        self.enter_phase(Phase::PlayerTurn, events);
        self.announce_turn(events);
    }

    /// Council palace occupants go first, in placement order; everyone else
    /// keeps their relative order.
    fn reorder_from_council(&mut self, events: &mut Vec<GameEvent>) {
        let council = self.board.council_order();
        if council.is_empty() {
            return;
        }
        let previous = std::mem::take(&mut self.players);
        let (mut first, rest): (Vec<Player>, Vec<Player>) =
            previous.into_iter().partition(|p| council.contains(&p.username));
        first.sort_by_key(|p| council.iter().position(|name| *name == p.username));
        first.extend(rest);
        self.players = first;
        events.push(GameEvent::TurnOrderChanged {
            order: self.turn_order(),
        });
    }

    fn announce_turn(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(player) = self.players.get_mut(self.current) {
            player.reset_turn();
            debug!(player = %player.username, round = self.round, "turn started");
            events.push(GameEvent::PlayerTurnStarted {
                player: player.username.clone(),
            });
        }
    }

    /// End the current player's turn.
    ///
    /// A player may pass without placing a family member.
    pub(crate) fn end_turn(&mut self, username: &str) -> ActionResult<Vec<GameEvent>> {
        self.check_turn(username, Phase::PlayerTurn)?;

        let mut events = Vec::new();
        self.turns_taken += 1;
        let turns_in_round = self.players.len() as u32 * self.config.turns_per_round;
        if self.turns_taken >= turns_in_round {
            self.end_round(&mut events);
        } else {
            self.current = (self.current + 1) % self.players.len();
            self.announce_turn(&mut events);
        }
        Ok(events)
    }

    /// Vatican report if one is due, otherwise the next round or the end.
    fn end_round(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(threshold) = self.config.vatican_threshold(self.round) {
            self.open_vatican_report(threshold, events);
        } else {
            self.next_round_or_end(events);
        }
    }

    pub(crate) fn next_round_or_end(&mut self, events: &mut Vec<GameEvent>) {
        if self.round >= self.config.rounds {
            self.end_game(events);
        } else {
            self.start_round(self.round + 1, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Occupant, SpaceId};
    use crate::cards::{DevelopmentCard, ExcommunicationTile};
    use crate::core::FamilyColor;
    use crate::game::GameSetup;

    fn game() -> Game {
        let cards = CardCategory::ALL.iter().flat_map(|&category| {
            (0..8).map(move |i| DevelopmentCard::new(format!("{category} {i}"), category, 1 + i / 4))
        });
        let setup = GameSetup::new()
            .with_cards(cards)
            .with_excommunications((1..=3).map(|p| ExcommunicationTile::new(u32::from(p), p)));
        Game::new(setup, 3).unwrap()
    }

    #[test]
    fn test_join_rules() {
        let mut game = game();
        game.join("anna").unwrap();
        assert!(game.join("anna").is_err());
        for name in ["bruno", "carla", "dario"] {
            game.join(name).unwrap();
        }
        assert!(game.join("elena").is_err());
    }

    #[test]
    fn test_start_needs_two_players() {
        let mut game = game();
        game.join("anna").unwrap();
        assert!(game.start().is_err());
        game.join("bruno").unwrap();

        let events = game.start().unwrap();
        assert!(events.contains(&GameEvent::PhaseChanged { phase: Phase::Started }));
        assert_eq!(game.phase, Phase::PlayerTurn);
        assert_eq!(game.round, 1);
        assert!(game.join("carla").is_err());
    }

    #[test]
    fn test_starting_resources_by_seat() {
        let mut game = game();
        game.join("anna").unwrap();
        game.join("bruno").unwrap();
        game.start().unwrap();

        let anna = game.player("anna").unwrap();
        assert_eq!(anna.resources.get(ResourceType::Gold), 5);
        assert_eq!(anna.resources.get(ResourceType::Servants), 3);
        assert_eq!(anna.color, Some(PlayerColor::Blue));
        assert_eq!(game.player("bruno").unwrap().resources.get(ResourceType::Gold), 6);
    }

    #[test]
    fn test_round_deals_period_cards() {
        let mut game = game();
        game.join("anna").unwrap();
        game.join("bruno").unwrap();
        game.start().unwrap();

        for tower in &game.board.towers {
            assert!(tower.floors.iter().all(|f| f.card.as_ref().is_some_and(|c| c.period == 1)));
        }
        assert_eq!(game.deck.len(), 16);
    }

    #[test]
    fn test_round_lasts_four_turns_each() {
        let mut game = game();
        game.join("anna").unwrap();
        game.join("bruno").unwrap();
        game.start().unwrap();

        for turn in 0..7 {
            let current = game.current_player().unwrap().username.clone();
            game.end_turn(&current).unwrap();
            assert_eq!(game.round, 1, "turn {turn}");
        }
        let current = game.current_player().unwrap().username.clone();
        let events = game.end_turn(&current).unwrap();
        assert_eq!(game.round, 2);
        assert!(events.iter().any(|e| matches!(e, GameEvent::DiceThrown { .. })));
    }

    #[test]
    fn test_council_palace_reorders_turns() {
        let mut game = game();
        for name in ["anna", "bruno", "carla"] {
            game.join(name).unwrap();
        }
        game.start().unwrap();
        game.board
            .space_mut(SpaceId::CouncilPalace)
            .unwrap()
            .occupy(Occupant::new("carla", FamilyColor::Black));

        let mut events = Vec::new();
        game.start_round(2, &mut events);

        assert_eq!(game.turn_order(), vec!["carla", "anna", "bruno"]);
        assert!(events.contains(&GameEvent::TurnOrderChanged {
            order: vec!["carla".into(), "anna".into(), "bruno".into()]
        }));
        assert!(game.board.council_order().is_empty());
    }
}
