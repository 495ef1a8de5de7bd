//! Personal bonus tile draft and leader draft.

use tracing::info;

use crate::core::{ActionError, ActionResult};
use crate::events::GameEvent;
use crate::game::{Game, Phase};

impl Game {
    /// Open the bonus tile draft in reverse turn order, or skip it.
    pub(crate) fn open_tile_draft(&mut self, events: &mut Vec<GameEvent>) {
        if self.bonus_tiles.is_empty() {
            self.open_leader_draft(events);
            return;
        }
        self.tile_draft = self.players.iter().rev().map(|p| p.username.clone()).collect();
        self.current = self.players.len() - 1;
        self.enter_phase(Phase::DraftingBonusTiles, events);
        events.push(GameEvent::PlayerTurnStarted {
            player: self.tile_draft[0].clone(),
        });
    }

    pub(crate) fn choose_bonus_tile(&mut self, username: &str, tile: u32) -> ActionResult<Vec<GameEvent>> {
        self.check_turn(username, Phase::DraftingBonusTiles)?;
        let index = self
            .bonus_tiles
            .iter()
            .position(|t| t.id == tile)
            .ok_or(ActionError::TileNotFound(tile))?;

        let chosen = self.bonus_tiles.remove(index);
        if let Some(player) = self.player_mut(username) {
            player.bonus_tile = Some(chosen);
        }
        self.tile_draft.retain(|name| name != username);

        let mut events = vec![GameEvent::BonusTileChosen {
            player: username.to_string(),
            tile,
        }];
        match self.tile_draft.first().cloned() {
            Some(next) => {
                self.current = self.seat_of(&next)?;
                events.push(GameEvent::PlayerTurnStarted { player: next });
            }
            None => {
                self.bonus_tiles.clear();
                self.open_leader_draft(&mut events);
            }
        }
        Ok(events)
    }

    /// Deal one leader pack per seat, or skip the draft.
    fn open_leader_draft(&mut self, events: &mut Vec<GameEvent>) {
        let seats = self.players.len();
        let pack_size = self.config.leader_pack_size;
        let mut packs = vec![Vec::new(); seats];
        for (i, leader) in std::mem::take(&mut self.leader_pool).into_iter().enumerate() {
            let pack = &mut packs[i % seats];
            if pack.len() < pack_size {
                pack.push(leader);
            }
        }

        if packs.iter().all(Vec::is_empty) {
            self.start_round(1, events);
            return;
        }
        info!(packs = seats, pack_size, "leader draft opened");
        self.leader_packs = packs;
        self.leader_picks.clear();
        self.current = 0;
        self.enter_phase(Phase::DraftingLeaderCards, events);
    }

    /// Pick a leader from the pack in front of the player.
    ///
    /// Everyone picks once per pass, in any order. When the pass completes
    /// the packs move one seat on.
    pub(crate) fn choose_leader(&mut self, username: &str, name: &str) -> ActionResult<Vec<GameEvent>> {
        let seat = self.seat_of(username)?;
        if self.phase != Phase::DraftingLeaderCards {
            return Err(ActionError::not_allowed("no leader draft in progress"));
        }
        if self.leader_picks.iter().any(|p| p == username) {
            return Err(ActionError::not_allowed(format!(
                "{username} already picked a leader in this pass"
            )));
        }
        let pack = self
            .leader_packs
            .get_mut(seat)
            .ok_or_else(|| ActionError::not_allowed("no leader pack for this seat"))?;
        let index = pack
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| ActionError::CardNotFound(name.to_string()))?;

        let leader = pack.remove(index);
        self.players[seat].leaders.push(leader);
        self.leader_picks.push(username.to_string());

        let mut events = vec![GameEvent::LeaderChosen {
            player: username.to_string(),
            leader: name.to_string(),
        }];

        let everyone_picked = self
            .players
            .iter()
            .enumerate()
            .all(|(i, p)| self.leader_picks.contains(&p.username) || self.leader_packs[i].is_empty());
        if everyone_picked {
            self.leader_picks.clear();
            self.leader_packs.rotate_right(1);
            if self.leader_packs.iter().all(Vec::is_empty) {
                self.leader_packs.clear();
                self.start_round(1, &mut events);
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ExcommunicationTile, LeaderCard, PersonalBonusTile};
    use crate::core::RulesConfig;
    use crate::game::GameSetup;
    use crate::resources::{ResourceSet, ResourceType};

    fn game(tiles: usize, leaders: usize) -> Game {
        let setup = GameSetup::new()
            .with_config(RulesConfig::new().with_leader_pack_size(2))
            .with_excommunications((1..=3).map(|p| ExcommunicationTile::new(u32::from(p), p)))
            .with_bonus_tiles((0..tiles as u32).map(|id| {
                PersonalBonusTile::new(
                    id,
                    ResourceSet::new().with(ResourceType::Gold, 2),
                    ResourceSet::new().with(ResourceType::Wood, 1),
                )
            }))
            .with_leaders((0..leaders).map(|i| LeaderCard::new(format!("Leader {i}"))));
        let mut game = Game::new(setup, 5).unwrap();
        game.join("anna").unwrap();
        game.join("bruno").unwrap();
        game
    }

    #[test]
    fn test_tile_draft_reverse_order() {
        let mut game = game(4, 0);
        game.start().unwrap();
        assert_eq!(game.phase, Phase::DraftingBonusTiles);

        assert!(game.choose_bonus_tile("anna", 0).is_err());
        assert_eq!(game.choose_bonus_tile("bruno", 9), Err(ActionError::TileNotFound(9)));

        game.choose_bonus_tile("bruno", 1).unwrap();
        game.choose_bonus_tile("anna", 0).unwrap();

        assert_eq!(game.player("bruno").unwrap().bonus_tile.as_ref().unwrap().id, 1);
        assert_eq!(game.phase, Phase::PlayerTurn);
        assert_eq!(game.current_player().unwrap().username, "anna");
    }

    #[test]
    fn test_leader_draft_rotates_packs() {
        let mut game = game(0, 4);
        game.start().unwrap();
        assert_eq!(game.phase, Phase::DraftingLeaderCards);

        let anna_pack: Vec<String> = game.leader_packs[0].iter().map(|l| l.name.clone()).collect();
        let bruno_pack: Vec<String> = game.leader_packs[1].iter().map(|l| l.name.clone()).collect();

        game.choose_leader("bruno", &bruno_pack[0]).unwrap();
        assert!(game.choose_leader("bruno", &bruno_pack[1]).is_err());
        assert!(matches!(
            game.choose_leader("anna", &bruno_pack[1]),
            Err(ActionError::CardNotFound(_))
        ));
        game.choose_leader("anna", &anna_pack[0]).unwrap();

        // Packs swapped seats.
        assert_eq!(game.leader_packs[0][0].name, bruno_pack[1]);
        assert_eq!(game.leader_packs[1][0].name, anna_pack[1]);

        game.choose_leader("anna", &bruno_pack[1]).unwrap();
        game.choose_leader("bruno", &anna_pack[1]).unwrap();

        assert_eq!(game.phase, Phase::PlayerTurn);
        assert_eq!(game.player("anna").unwrap().leaders.len(), 2);
        assert_eq!(game.player("bruno").unwrap().leaders.len(), 2);
    }

    #[test]
    fn test_no_drafts_goes_straight_to_round_one() {
        let mut game = game(0, 0);
        game.start().unwrap();
        assert_eq!(game.phase, Phase::PlayerTurn);
        assert_eq!(game.round, 1);
    }
}
