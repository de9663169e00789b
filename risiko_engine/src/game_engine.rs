use risiko_shared::player::PlayerId;

use crate::{
    capability::{Capabilities, Style},
    error::EngineError,
    narrate,
    state::GameSession,
    turn::{TurnOutcome, TurnStateMachine},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    Won(PlayerId),
    ReturnToMenu,
    /// The session was already decided when play started.
    AlreadyOver(Option<PlayerId>),
}

/// Plays a session from wherever it stands until someone wins or a player
/// saves and leaves.
pub struct GameEngine<'a> {
    session: GameSession,
    caps: &'a mut Capabilities,
}

impl<'a> GameEngine<'a> {
    pub fn new(session: GameSession, caps: &'a mut Capabilities) -> Self {
        Self { session, caps }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    pub fn run(&mut self) -> Result<GameResult, EngineError> {
        if let Some(name) = self.session.log_name() {
            self.caps.log.set_active_log(name);
        }
        narrate::flush_journal(&mut self.session, self.caps);

        if !self.session.in_progress() {
            return Ok(GameResult::AlreadyOver(self.session.winner()));
        }
        if !self.session.armies_distributed() {
            self.place_initial_armies()?;
        }

        loop {
            let player = self.session.current_player();
            if self.session.territories_of(player).is_empty() {
                tracing::debug!(?player, "skipping eliminated player");
                self.advance();
                continue;
            }

            tracing::info!(
                ?player,
                round = self.session.round(),
                "turn begins"
            );
            match TurnStateMachine::new(&mut self.session, self.caps).run()? {
                TurnOutcome::Completed => self.advance(),
                TurnOutcome::Won(winner) => {
                    self.caps.journal("GAME OVER");
                    return Ok(GameResult::Won(winner));
                }
                TurnOutcome::ReturnToMenu => return Ok(GameResult::ReturnToMenu),
            }
        }
    }

    /// One army goes onto every owned territory automatically, then each
    /// player places the rest of their starting armies one at a time.
    pub fn place_initial_armies(&mut self) -> Result<(), EngineError> {
        let turn_order = self.session.turn_order().to_vec();

        for &player in &turn_order {
            for territory in self.session.territories_of(player) {
                if let Err(err) = self.session.place_initial_troop(player, territory) {
                    tracing::warn!(?player, %err, "automatic placement failed");
                }
            }
        }
        narrate::flush_journal(&mut self.session, self.caps);

        for &player in &turn_order {
            let name = self.session.player(player).name.clone();
            self.caps
                .emit(Style::Title, format!("{name}, place your starting armies"));

            while self.session.player(player).armies > 0 {
                let owned = self.session.territories_of(player);
                let title = format!(
                    "{} armies left. Choose a territory:",
                    self.session.player(player).armies
                );
                let territory = self.caps.choose_territory(&self.session, &title, &owned)?;
                if let Err(err) = self.session.place_initial_troop(player, territory) {
                    self.caps.emit(Style::Warning, err.to_string());
                }
            }
            narrate::flush_journal(&mut self.session, self.caps);
        }

        self.session.mark_armies_distributed();
        Ok(())
    }

    fn advance(&mut self) {
        if self.session.advance_turn() {
            let finished = self.session.round() - 1;
            tracing::info!(round = finished, "round completed");
            self.caps
                .emit(Style::Title, format!("ROUND {finished} COMPLETED"));
            self.caps.journal(&format!("ROUND {finished} COMPLETED"));
        }
    }
}
