//! Lobby, room countdown and client mirrors working together.
//!
//! Time is paused, so countdown deadlines are exact.

use std::time::Duration;

use lorenzo_rules::{
    Action, ClientMirror, ExcommunicationTile, GameEvent, GameSetup, Lobby, Phase, ResyncPolicy, RoomError,
    RulesConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lorenzo_rules=debug")
        .with_test_writer()
        .try_init();
}

fn lobby() -> Lobby {
    init_tracing();
    let setup = GameSetup::new()
        .with_config(RulesConfig::new().with_room_start_delay(Duration::from_secs(60)))
        .with_excommunications((1..=3).map(|p| ExcommunicationTile::new(u32::from(p), p)));
    let mut lobby = Lobby::new(setup, 7).unwrap();
    for name in ["anna", "bruno", "carla"] {
        lobby.login(name).unwrap();
    }
    lobby
}

#[tokio::test(start_paused = true)]
async fn test_countdown_resumes_after_each_join() {
    let mut lobby = lobby();
    let room = lobby.join_any("anna").await.unwrap();
    lobby.join_any("bruno").await.unwrap();
    assert_eq!(room.countdown_remaining().await, Some(Duration::from_secs(60)));

    tokio::time::sleep(Duration::from_secs(45)).await;
    lobby.join_any("carla").await.unwrap();
    tokio::task::yield_now().await;
    assert_eq!(room.countdown_remaining().await, Some(Duration::from_secs(15)));
    assert_eq!(room.phase().await, Phase::WaitingForPlayers);

    tokio::time::sleep(Duration::from_secs(16)).await;
    assert_eq!(room.phase().await, Phase::PlayerTurn);
    assert_eq!(room.countdown_remaining().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_login_required() {
    let mut lobby = lobby();
    assert_eq!(
        lobby.join_any("zoe").await.unwrap_err(),
        RoomError::NotLoggedIn("zoe".into())
    );
}

#[tokio::test(start_paused = true)]
async fn test_mirror_follows_the_room() {
    let mut lobby = lobby();
    let room = lobby.join_any("anna").await.unwrap();
    lobby.join_any("bruno").await.unwrap();
    tokio::time::sleep(Duration::from_secs(61)).await;

    let mut mirror = ClientMirror::new(&room.snapshot().await.unwrap(), ResyncPolicy).unwrap();
    let mut events = room.subscribe();

    let order = room.players().await;
    for player in order.iter().cycle().take(5) {
        room.submit(player, &Action::EndTurn).await.unwrap();
    }
    assert!(matches!(events.try_recv(), Ok(GameEvent::PlayerTurnStarted { .. })));

    for record in room.records_since(mirror.game().sequence()).await {
        mirror.apply(&record).unwrap();
    }
    assert_eq!(mirror.game().sequence(), 5);
    assert_eq!(mirror.game().current_player().unwrap().username, order[1]);
    assert!(!mirror.needs_snapshot());
}
