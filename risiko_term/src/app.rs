use std::{io, path::PathBuf};

use rand::Rng;
use risiko_engine::{
    capability::{Capabilities, Style},
    error::{EngineError, PersistenceError, SetupError},
    game_engine::{GameEngine, GameResult},
    setup::gather_roster,
    state::GameSession,
};
use risiko_shared::map;
use thiserror::Error;

use crate::{
    config::Config,
    game_log::{next_game_log_name, FileLog},
    saves::{save_name, JsonSaves},
    terminal::{TerminalInput, TerminalOutput},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not prepare {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Runs the main menu on the process terminal until the player quits or
/// input ends.
pub fn run(config: &Config) -> Result<(), AppError> {
    let saves = JsonSaves::new(&config.saves_dir).map_err(|source| AppError::Directory {
        path: config.saves_dir.clone(),
        source,
    })?;
    let log = FileLog::new(&config.logs_dir).map_err(|source| AppError::Directory {
        path: config.logs_dir.clone(),
        source,
    })?;
    let caps = Capabilities::new(
        TerminalInput::stdio(),
        TerminalOutput::stdout(config.plain),
        saves,
        log,
    );

    App::new(caps, config.logs_dir.clone(), config.seed).main_menu()
}

pub struct App {
    caps: Capabilities,
    logs_dir: PathBuf,
    seed: Option<u64>,
}

impl App {
    pub fn new(caps: Capabilities, logs_dir: PathBuf, seed: Option<u64>) -> Self {
        Self {
            caps,
            logs_dir,
            seed,
        }
    }

    /// New game, load game or quit, until the player quits. The input
    /// stream ending counts as quitting.
    pub fn main_menu(&mut self) -> Result<(), AppError> {
        match self.menu_loop() {
            Err(EngineError::InputClosed(_)) => {
                tracing::info!("input closed, leaving");
                Ok(())
            }
            other => other.map_err(AppError::from),
        }
    }

    fn menu_loop(&mut self) -> Result<(), EngineError> {
        let options = ["New game", "Load game", "Quit"].map(str::to_owned);
        loop {
            self.caps.emit(Style::Title, "RISIKO");
            let session = match self.caps.choose("Main menu:", &options)? {
                0 => self.new_game()?,
                1 => self.load_game()?,
                _ => break,
            };
            let Some(session) = session else {
                continue;
            };
            if !self.play(session)? {
                break;
            }
        }
        self.caps.emit(Style::Plain, "Goodbye!");
        Ok(())
    }

    fn new_game(&mut self) -> Result<Option<GameSession>, EngineError> {
        let roster = gather_roster(&mut self.caps)?;
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        tracing::info!(seed, players = roster.len(), "starting a new game");

        let session = map::classic()
            .map_err(SetupError::from)
            .and_then(|map| GameSession::new(map, roster, seed));
        match session {
            Ok(mut session) => {
                session.set_log_name(next_game_log_name(&self.logs_dir));
                Ok(Some(session))
            }
            Err(err) => {
                tracing::warn!(%err, "setup failed");
                self.caps
                    .emit(Style::Error, format!("Could not start the game: {err}"));
                Ok(None)
            }
        }
    }

    fn load_game(&mut self) -> Result<Option<GameSession>, EngineError> {
        let saves = match self.caps.persistence.list_saves() {
            Ok(saves) => saves,
            Err(err) => {
                self.caps
                    .emit(Style::Error, format!("Could not list the saved games: {err}"));
                return Ok(None);
            }
        };
        if saves.is_empty() {
            self.caps.emit(Style::Info, "There are no saved games.");
            return Ok(None);
        }

        self.caps.emit(Style::Info, "Saved games:");
        for name in &saves {
            self.caps.emit(Style::Plain, format!("  {name}"));
        }
        let answer = self.caps.ask("Name of the game to load:")?;
        let name = save_name(&answer);

        match self.caps.persistence.load(name) {
            Ok(mut session) => {
                if session.log_name().is_none() {
                    session.set_log_name(format!("{name}.log"));
                }
                Ok(Some(session))
            }
            Err(PersistenceError::NotFound(_)) => {
                self.caps
                    .emit(Style::Warning, format!("There is no saved game named {name}."));
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(%err, save = name, "loading failed");
                self.caps
                    .emit(Style::Error, format!("Could not load the game: {err}"));
                Ok(None)
            }
        }
    }

    /// Returns whether to go back to the main menu.
    fn play(&mut self, session: GameSession) -> Result<bool, EngineError> {
        let mut engine = GameEngine::new(session, &mut self.caps);
        let result = engine.run()?;
        let winner = match result {
            GameResult::ReturnToMenu => return Ok(true),
            GameResult::Won(winner) => Some(winner),
            GameResult::AlreadyOver(winner) => winner,
        };
        let winner = winner.map(|id| engine.session().player(id).name.clone());

        if matches!(result, GameResult::AlreadyOver(_)) {
            let text = match winner {
                Some(name) => format!("This game is already over: {name} won."),
                None => "This game is already over.".to_owned(),
            };
            self.caps.emit(Style::Info, text);
        }
        Ok(self
            .caps
            .confirm("The game is over. Return to the main menu?")?)
    }
}
