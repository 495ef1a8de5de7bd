//! Whole games from the first join to the final score.

use lorenzo_rules::{
    Action, ExcommunicationChoice, ExcommunicationTile, Game, GameEvent, GameResult, GameSetup, LeaderCard, Phase,
    PersonalBonusTile, ResourceSet, ResourceType, RulesEngine,
};

fn setup() -> GameSetup {
    GameSetup::new()
        .with_excommunications((1..=3).map(|p| ExcommunicationTile::new(u32::from(p), p)))
        .with_bonus_tiles((0..4).map(|id| {
            PersonalBonusTile::new(
                id,
                ResourceSet::new().with(ResourceType::Gold, 2),
                ResourceSet::new().with(ResourceType::Wood, 1),
            )
        }))
        .with_leaders((0..8).map(|i| LeaderCard::new(format!("Leader {i}"))))
}

/// Pass every turn, answering Vatican reports with `choice`, until the game ends.
fn play_out(game: &mut Game, choice: ExcommunicationChoice) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while game.phase != Phase::GameEnded {
        let (player, action) = if game.phase == Phase::VaticanReport {
            (game.vatican_queue[0].clone(), Action::DecideExcommunication { choice })
        } else {
            (game.current_player().unwrap().username.clone(), Action::EndTurn)
        };
        events.extend(game.apply_action(&player, &action).unwrap());
    }
    events
}

fn drafted_game() -> Game {
    let mut game = Game::new(setup(), 1234).unwrap();
    game.join("anna").unwrap();
    game.join("bruno").unwrap();
    game.start().unwrap();

    assert_eq!(game.phase, Phase::DraftingBonusTiles);
    game.apply_action("bruno", &Action::ChooseBonusTile { tile: 0 })
        .unwrap();
    game.apply_action("anna", &Action::ChooseBonusTile { tile: 1 })
        .unwrap();

    assert_eq!(game.phase, Phase::DraftingLeaderCards);
    while game.phase == Phase::DraftingLeaderCards {
        for (seat, name) in ["anna", "bruno"].into_iter().enumerate() {
            let pick = game.leader_packs[seat][0].name.clone();
            game.apply_action(name, &Action::ChooseLeader { name: pick })
                .unwrap();
        }
    }
    game
}

#[test]
fn test_drafts_lead_into_round_one() {
    let game = drafted_game();
    assert_eq!(game.phase, Phase::PlayerTurn);
    assert_eq!(game.round, 1);
    for player in &game.players {
        assert_eq!(player.leaders.len(), 4);
        assert!(player.bonus_tile.is_some());
    }
}

#[test]
fn test_passive_game_reaches_the_end() {
    let mut game = drafted_game();
    let events = play_out(&mut game, ExcommunicationChoice::AcceptExcommunication);

    let rounds = events
        .iter()
        .filter(|e| matches!(e, GameEvent::RoundStarted { .. }))
        .count();
    assert_eq!(rounds, 5);
    let reports = events
        .iter()
        .filter(|e| matches!(e, GameEvent::VaticanReportStarted { .. }))
        .count();
    assert_eq!(reports, 3);
    assert!(matches!(events.last(), Some(GameEvent::GameEnded { .. })));

    // Nobody gained faith, so everyone was excommunicated every period.
    for player in &game.players {
        assert_eq!(player.excommunications.len(), 3);
    }

    let result = game.is_terminal().unwrap();
    let scores = game.final_scores.clone().unwrap();
    assert_eq!(result, GameResult::from_scores(&scores));
    // bruno started with one more gold: 13 goods vs 12, both worth 2 points.
    assert_eq!(result, GameResult::Winners(vec!["anna".into(), "bruno".into()]));
}

#[test]
fn test_actions_after_the_end_are_rejected() {
    let mut game = drafted_game();
    play_out(&mut game, ExcommunicationChoice::SupportChurch);
    let sequence = game.sequence();

    assert!(game.apply_action("anna", &Action::EndTurn).is_err());
    assert_eq!(game.sequence(), sequence);
    assert_eq!(game.history.len() as u32, sequence);
}

#[test]
fn test_same_seed_same_game() {
    let mut first = drafted_game();
    let mut second = drafted_game();
    play_out(&mut first, ExcommunicationChoice::AcceptExcommunication);
    play_out(&mut second, ExcommunicationChoice::AcceptExcommunication);
    assert_eq!(first.dice, second.dice);
    assert_eq!(first.final_scores, second.final_scores);
    assert_eq!(first.history, second.history);
}
