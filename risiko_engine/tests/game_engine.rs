mod common;

use common::{harness, repeat};
use risiko_engine::{
    capability::Persistence,
    game_engine::{GameEngine, GameResult},
    setup::NewPlayer,
    state::{record, GameSession},
    turn::TurnPhase,
    EngineError,
};
use risiko_shared::{map, player::Color};

fn new_session(seed: u64) -> GameSession {
    let roster = vec![
        NewPlayer::new("Ada", Color::Green),
        NewPlayer::new("Bo", Color::Black),
    ];
    let mut session = GameSession::new(map::classic().unwrap(), roster, seed).unwrap();
    session.set_log_name("game_1_01-01-2026.log");
    session
}

fn income(session: &GameSession, turn: usize) -> u32 {
    let player = session.turn_order()[turn];
    record::start_turn(session.map(), player).total()
}

#[test]
fn initial_placement_spends_every_starting_army() {
    let session = new_session(3);
    let mut h = harness(repeat("1", 2 * (40 - 21)));

    let mut engine = GameEngine::new(session, &mut h.caps);
    engine.place_initial_armies().unwrap();
    let session = engine.into_session();

    assert!(session.armies_distributed());
    assert!(session.players().iter().all(|p| p.armies == 0));
    assert!(session.players().iter().all(|p| p.total_armies == 40));
    assert!(session.map().territories().all(|(_, t)| t.troops() >= 1));
    let total: u32 = session.map().territories().map(|(_, t)| t.troops()).sum();
    assert_eq!(total, 80);
}

#[test]
fn a_full_round_then_save_and_resume() {
    let session = new_session(11);
    let (first, second) = (income(&session, 0), income(&session, 1));
    let first_name = session.player(session.turn_order()[0]).name.to_uppercase();

    let mut script: Vec<String> = repeat("1", 38).collect();
    script.extend(repeat("1", first));
    script.push("6".to_owned());
    script.extend(repeat("1", second));
    script.extend(["7", "slot"].map(str::to_owned));
    let mut h = harness(script);

    let result = GameEngine::new(session, &mut h.caps).run().unwrap();
    assert_eq!(result, GameResult::ReturnToMenu);
    assert_eq!(h.saves.list_saves().unwrap(), ["slot"]);

    let log = h.log.entries("slot.log");
    assert!(log[0].starts_with("GAME STARTED. Turn order: "));
    assert!(log.contains(&format!("Turn of {first_name} ended")));
    assert_eq!(log.last().map(String::as_str), Some("Game saved as slot"));

    let restored = h.saves.load("slot").unwrap();
    assert_eq!(restored.current_index(), 1);
    assert_eq!(restored.round(), 1);
    assert_eq!(restored.turn().phase, TurnPhase::Menu);
    assert!(restored.armies_distributed());

    let mut script: Vec<String> = vec!["6".to_owned()];
    script.extend(repeat("1", first));
    script.extend(["7", "slot"].map(str::to_owned));
    let mut h = harness(script);

    let result = GameEngine::new(restored, &mut h.caps).run().unwrap();
    assert_eq!(result, GameResult::ReturnToMenu);
    assert!(h.output.contains("Resuming the saved game"));
    assert!(h.output.contains("ROUND 1 COMPLETED"));
    assert!(h.log.entries("slot.log").contains(&"ROUND 1 COMPLETED".to_owned()));

    let restored = h.saves.load("slot").unwrap();
    assert_eq!(restored.round(), 2);
    assert_eq!(restored.current_index(), 0);
}

#[test]
fn running_out_of_input_is_an_error() {
    let session = new_session(5);
    let mut h = harness(repeat("1", 3));

    let result = GameEngine::new(session, &mut h.caps).run();
    assert!(matches!(result, Err(EngineError::InputClosed(_))));
}

#[test]
fn decided_games_do_not_restart() {
    let session = new_session(5);
    let mut value: serde_json::Value = serde_json::from_str(&session.encode().unwrap()).unwrap();
    value["in_progress"] = false.into();
    value["winner"] = 1.into();
    let finished = GameSession::decode(&value.to_string()).unwrap();

    let mut h = harness(Vec::<String>::new());
    let result = GameEngine::new(finished, &mut h.caps).run().unwrap();
    assert_eq!(
        result,
        GameResult::AlreadyOver(Some(risiko_shared::player::PlayerId::P1))
    );
}
