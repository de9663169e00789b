use std::{fs, path::Path};

use risiko_engine::{
    capability::{
        memory::{RecordingOutput, ScriptedInput},
        Capabilities, Persistence,
    },
    setup::NewPlayer,
    state::GameSession,
};
use risiko_shared::{map, player::Color};
use risiko_term::{app::App, game_log::FileLog, saves::JsonSaves};
use tempfile::TempDir;

struct Setup {
    _root: TempDir,
    saves_dir: std::path::PathBuf,
    logs_dir: std::path::PathBuf,
}

fn setup() -> Setup {
    let root = tempfile::tempdir().unwrap();
    let saves_dir = root.path().join("saves");
    let logs_dir = root.path().join("logs");
    Setup {
        _root: root,
        saves_dir,
        logs_dir,
    }
}

fn app(setup: &Setup, script: &[&str]) -> (App, RecordingOutput) {
    let output = RecordingOutput::default();
    let caps = Capabilities::new(
        ScriptedInput::new(script.iter().copied()),
        output.clone(),
        JsonSaves::new(&setup.saves_dir).unwrap(),
        FileLog::new(&setup.logs_dir).unwrap(),
    );
    (App::new(caps, setup.logs_dir.clone(), Some(21)), output)
}

fn session() -> GameSession {
    let roster = vec![
        NewPlayer::new("Ada", Color::Yellow),
        NewPlayer::new("Bo", Color::Blue),
    ];
    GameSession::new(map::classic().unwrap(), roster, 4).unwrap()
}

fn log_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".log"))
        .collect();
    names.sort();
    names
}

#[test]
fn quitting_from_the_main_menu() {
    let setup = setup();
    let (mut app, output) = app(&setup, &["3"]);
    app.main_menu().unwrap();
    assert!(output.contains("Goodbye!"));
}

#[test]
fn new_game_starts_a_numbered_log() {
    let setup = setup();
    // Two players, names, colors, then input runs out during placement.
    let (mut app, output) = app(&setup, &["1", "2", "Ada", "ada", "Bo", "1", "1", "1"]);
    app.main_menu().unwrap();

    assert!(output.contains("ada is already taken."));
    assert!(output.contains("place your starting armies"));

    let logs = log_files(&setup.logs_dir);
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("game_1_"));
    let text = fs::read_to_string(setup.logs_dir.join(&logs[0])).unwrap();
    assert!(text.contains("] GAME STARTED. Turn order: "));
    assert!(text.contains(" placed 1 army on "));
}

#[test]
fn loading_without_saves_returns_to_the_menu() {
    let setup = setup();
    fs::create_dir_all(&setup.saves_dir).unwrap();
    fs::write(setup.saves_dir.join(".gitkeep"), "").unwrap();

    let (mut app, output) = app(&setup, &["2", "3"]);
    app.main_menu().unwrap();
    assert!(output.contains("There are no saved games."));
    assert!(output.contains("Goodbye!"));
}

#[test]
fn loading_an_unknown_name_warns() {
    let setup = setup();
    JsonSaves::new(&setup.saves_dir)
        .unwrap()
        .save(&session(), "monday")
        .unwrap();

    let (mut app, output) = app(&setup, &["2", "tuesday.save", "3"]);
    app.main_menu().unwrap();
    assert!(output.contains("  monday"));
    assert!(output.contains("There is no saved game named tuesday."));
}

#[test]
fn loading_a_finished_game_offers_to_quit() {
    let setup = setup();
    let mut value: serde_json::Value =
        serde_json::from_str(&session().encode().unwrap()).unwrap();
    value["in_progress"] = false.into();
    value["winner"] = 0.into();
    fs::create_dir_all(&setup.saves_dir).unwrap();
    fs::write(setup.saves_dir.join("final.save"), value.to_string()).unwrap();

    let (mut app, output) = app(&setup, &["2", "final", "n"]);
    app.main_menu().unwrap();

    assert!(output.contains("This game is already over: Ada won."));
    assert!(output.contains("The game is over. Return to the main menu?"));
    assert!(output.contains("Goodbye!"));
}
