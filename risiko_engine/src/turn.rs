use risiko_shared::{
    map::TerritoryId,
    player::PlayerId,
    record::MoveAttack,
};
use serde::{Deserialize, Serialize};

use crate::{
    capability::{Capabilities, Style},
    cards,
    error::EngineError,
    narrate::{self, describe_card},
    state::{action::BonusCard, GameSession},
    CARD_REDEMPTION_ROUND, MAX_ATTACK_DICE,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    StartTurn,
    DistributeArmies,
    Menu,
    EndTurn,
}

/// Figures shown to the player at the start of their turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub armies_received: u32,
    pub territories: u32,
    pub continents: u32,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct TurnState {
    pub phase: TurnPhase,
    pub armies_to_distribute: u32,
    pub snapshot: TurnSnapshot,
    #[serde(default)]
    pub complete: bool,
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, enumn::N)]
pub enum MenuChoice {
    ViewObjective = 1,
    ViewTerritories,
    ViewCards,
    Attack,
    MoveAndEndTurn,
    EndTurn,
    SaveAndExit,
}

impl MenuChoice {
    pub const ALL: [Self; 7] = [
        Self::ViewObjective,
        Self::ViewTerritories,
        Self::ViewCards,
        Self::Attack,
        Self::MoveAndEndTurn,
        Self::EndTurn,
        Self::SaveAndExit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ViewObjective => "View objective",
            Self::ViewTerritories => "View territories",
            Self::ViewCards => "View cards",
            Self::Attack => "Attack",
            Self::MoveAndEndTurn => "Move armies and end turn",
            Self::EndTurn => "End turn",
            Self::SaveAndExit => "Save and exit",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnOutcome {
    Completed,
    Won(PlayerId),
    ReturnToMenu,
}

/// Drives one player's turn through its phases. The current phase lives in
/// the session, so a turn saved from the menu resumes in the menu.
pub struct TurnStateMachine<'a> {
    session: &'a mut GameSession,
    caps: &'a mut Capabilities,
    player: PlayerId,
}

impl<'a> TurnStateMachine<'a> {
    pub fn new(session: &'a mut GameSession, caps: &'a mut Capabilities) -> Self {
        let player = session.current_player();
        Self {
            session,
            caps,
            player,
        }
    }

    pub fn run(mut self) -> Result<TurnOutcome, EngineError> {
        if self.session.resumed() {
            let name = self.name();
            self.caps.emit(
                Style::Info,
                format!("Resuming the saved game: it is {name}'s turn."),
            );
            self.session.clear_resumed();
        }

        while !self.session.turn().complete {
            match self.session.turn().phase {
                TurnPhase::StartTurn => self.start_turn(),
                TurnPhase::DistributeArmies => self.distribute_armies()?,
                TurnPhase::Menu => self.menu()?,
                TurnPhase::EndTurn => {
                    tracing::warn!(player = ?self.player, "turn reached its end phase unfinished");
                    self.session.turn_mut().complete = true;
                }
            }
            narrate::flush_journal(self.session, self.caps);

            if !self.session.in_progress() {
                return Ok(TurnOutcome::Won(self.player));
            }
            if self.session.return_to_menu() {
                return Ok(TurnOutcome::ReturnToMenu);
            }
        }

        self.session.turn_mut().phase = TurnPhase::EndTurn;
        Ok(TurnOutcome::Completed)
    }

    fn name(&self) -> String {
        self.session.player(self.player).name.clone()
    }

    fn start_turn(&mut self) {
        let start = self.session.start_turn();
        tracing::info!(player = ?self.player, armies = start.total(), "turn started");

        let name = self.name();
        self.caps.emit(Style::Title, format!("It is {name}'s turn"));
        self.caps.emit(
            Style::Info,
            format!(
                "You hold {} territories and {} continents and receive {} armies.",
                start.territories_held,
                start.continents_held.len(),
                start.total()
            ),
        );
        self.session.turn_mut().phase = TurnPhase::DistributeArmies;
    }

    fn distribute_armies(&mut self) -> Result<(), EngineError> {
        if self.session.round() >= CARD_REDEMPTION_ROUND {
            self.offer_redemption()?;
        }

        while self.session.turn().armies_to_distribute > 0 {
            let owned = self.session.territories_of(self.player);
            if owned.is_empty() {
                break;
            }

            let title = format!(
                "{} armies left to place. Choose a territory:",
                self.session.turn().armies_to_distribute
            );
            let territory = self.caps.choose_territory(self.session, &title, &owned)?;
            if let Err(err) = self.session.place_troop(self.player, territory) {
                self.caps.emit(Style::Warning, err.to_string());
            }
            narrate::flush_journal(self.session, self.caps);
        }

        if !self.check_victory() {
            self.session.turn_mut().phase = TurnPhase::Menu;
        }
        Ok(())
    }

    fn offer_redemption(&mut self) -> Result<(), EngineError> {
        let mut redeemed_any = false;
        loop {
            let hand = &self.session.player(self.player).cards;
            if !cards::has_valid_set(hand) {
                if !redeemed_any {
                    let message = if hand.len() < 3 {
                        format!("You hold {} cards, not enough to redeem.", hand.len())
                    } else {
                        format!("Your {} cards form no valid combination.", hand.len())
                    };
                    self.caps.emit(Style::Info, message);
                }
                return Ok(());
            }

            if !self
                .caps
                .confirm("You hold a valid card combination. Redeem it now?")?
            {
                return Ok(());
            }

            self.show_cards();
            self.caps.emit(
                Style::Prompt,
                "Enter the numbers of three cards separated by spaces:",
            );
            loop {
                let line = self.caps.input.read_line()?;
                let selection = cards::parse_card_selection(
                    &line,
                    &self.session.player(self.player).cards,
                )
                .map_err(Into::into)
                .and_then(|indices| self.session.redeem_cards(self.player, indices));

                match selection {
                    Ok(redeemed) => {
                        self.caps.emit(
                            Style::Success,
                            format!(
                                "Redeemed {} for {} armies.",
                                redeemed.set,
                                redeemed.total()
                            ),
                        );
                        break;
                    }
                    Err(err) => self.caps.emit(Style::Error, format!("{err}. Try again:")),
                }
            }

            redeemed_any = true;
            narrate::flush_journal(self.session, self.caps);
        }
    }

    fn menu(&mut self) -> Result<(), EngineError> {
        loop {
            let options: Vec<String> = MenuChoice::ALL
                .iter()
                .map(|choice| choice.label().to_owned())
                .collect();
            let index = self.caps.choose("What do you want to do?", &options)?;
            let Some(choice) = MenuChoice::n(index as u8 + 1) else {
                continue;
            };

            match choice {
                MenuChoice::ViewObjective => self.show_objective(),
                MenuChoice::ViewTerritories => self.show_territories(),
                MenuChoice::ViewCards => self.show_cards(),
                MenuChoice::Attack => {
                    self.attack_phase()?;
                    if !self.session.in_progress() {
                        return Ok(());
                    }
                }
                MenuChoice::MoveAndEndTurn => {
                    if self.fortify()? {
                        if !self.session.in_progress() {
                            return Ok(());
                        }
                        self.session.end_turn(self.player);
                        return Ok(());
                    }
                }
                MenuChoice::EndTurn => {
                    self.session.end_turn(self.player);
                    return Ok(());
                }
                MenuChoice::SaveAndExit => {
                    self.save()?;
                    if self.session.return_to_menu() {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn show_objective(&mut self) {
        let objective = self.session.player(self.player).objective.clone();
        self.caps.emit(Style::Info, format!("Your objective: {objective}"));
    }

    fn show_territories(&mut self) {
        let map = self.session.map();
        let lines: Vec<String> = self
            .session
            .territories_of(self.player)
            .into_iter()
            .map(|id| {
                let territory = map.territory(id);
                format!(
                    "{} [{}]: {} armies",
                    territory.name(),
                    map.continent(territory.continent()).name(),
                    territory.troops()
                )
            })
            .collect();

        let continents: Vec<&str> = map
            .continents_owned_by(self.player)
            .into_iter()
            .map(|id| map.continent(id).name())
            .collect();
        let continents = if continents.is_empty() {
            "none".to_owned()
        } else {
            continents.join(", ")
        };
        let snapshot = self.session.turn().snapshot;

        self.caps.emit(
            Style::Title,
            format!("Your territories ({})", lines.len()),
        );
        for line in lines {
            self.caps.emit(Style::Plain, line);
        }
        self.caps.emit(
            Style::Info,
            format!("Continents under your control: {continents}"),
        );
        self.caps.emit(
            Style::Info,
            format!(
                "This turn you received {} armies, holding {} territories and {} continents.",
                snapshot.armies_received, snapshot.territories, snapshot.continents
            ),
        );
    }

    fn show_cards(&mut self) {
        let cards = self.session.player(self.player).cards.clone();
        if cards.is_empty() {
            self.caps.emit(Style::Info, "You hold no cards.");
            return;
        }

        self.caps.emit(Style::Title, "Your cards");
        for (i, &card) in cards.iter().enumerate() {
            let line = format!("{}. {}", i + 1, describe_card(self.session, card));
            self.caps.emit(Style::Plain, line);
        }
    }

    fn attack_phase(&mut self) -> Result<(), EngineError> {
        loop {
            let map = self.session.map();
            let sources: Vec<TerritoryId> = self
                .session
                .territories_of(self.player)
                .into_iter()
                .filter(|&t| {
                    map.territory(t).troops() >= 2
                        && map
                            .adjacent_to(t)
                            .iter()
                            .any(|&n| map.territory(n).occupier() != Some(self.player))
                })
                .collect();
            if sources.is_empty() {
                self.caps
                    .emit(Style::Warning, "None of your territories can attack.");
                return Ok(());
            }

            let Some(source) =
                self.caps
                    .choose_territory_or_back(self.session, "Attack from:", &sources)?
            else {
                return Ok(());
            };

            let map = self.session.map();
            let targets: Vec<TerritoryId> = map
                .adjacent_to(source)
                .iter()
                .copied()
                .filter(|&n| map.territory(n).occupier() != Some(self.player))
                .collect();
            let Some(target) =
                self.caps
                    .choose_territory_or_back(self.session, "Attack which territory?", &targets)?
            else {
                continue;
            };

            let max_dice = MAX_ATTACK_DICE.min(map.territory(source).troops() - 1);
            let dice = self.caps.choose_number("How many dice?", 1, max_dice)?;
            let mov = MoveAttack {
                attacking_territory: source,
                defending_territory: target,
                attacking_dice: dice,
            };

            let outcome = match self.session.resolve_attack(self.player, mov) {
                Ok(outcome) => outcome,
                Err(err) => {
                    self.caps.emit(Style::Error, err.to_string());
                    continue;
                }
            };
            narrate::flush_journal(self.session, self.caps);

            let attack = &outcome.attack;
            self.caps.emit(
                Style::Info,
                format!(
                    "You rolled {:?}, the defender rolled {:?}. You lost {}, the defender lost {}.",
                    attack.attacker_rolls,
                    attack.defender_rolls,
                    attack.attacking_lost,
                    attack.defending_lost
                ),
            );

            if attack.territory_conquered {
                let target_name = self.session.map().territory(target).name().to_owned();
                self.caps
                    .emit(Style::Success, format!("You conquered {target_name}!"));
                match outcome.bonus {
                    Some(BonusCard::Drawn(card)) => {
                        let card = describe_card(self.session, card);
                        self.caps
                            .emit(Style::Success, format!("You drew a bonus card: {card}"));
                    }
                    Some(BonusCard::DeckEmpty) => {
                        self.caps
                            .emit(Style::Warning, "The deck is empty, no bonus card this time.");
                    }
                    None => {}
                }

                self.occupy(source, target)?;
                if self.check_victory() {
                    return Ok(());
                }
            }

            if !self.caps.confirm("Keep attacking?")? {
                return Ok(());
            }
        }
    }

    fn occupy(&mut self, source: TerritoryId, target: TerritoryId) -> Result<(), EngineError> {
        let max = self.session.map().territory(source).troops().saturating_sub(1);
        if max == 0 {
            return Ok(());
        }

        let troops = self
            .caps
            .choose_number("How many armies move into the conquered territory?", 1, max)?;
        if let Err(err) = self
            .session
            .move_after_conquest(self.player, source, target, troops)
        {
            self.caps.emit(Style::Error, err.to_string());
        }
        narrate::flush_journal(self.session, self.caps);
        Ok(())
    }

    /// Returns `false` when no move was made and the turn goes on.
    fn fortify(&mut self) -> Result<bool, EngineError> {
        let map = self.session.map();
        let sources: Vec<TerritoryId> = self
            .session
            .territories_of(self.player)
            .into_iter()
            .filter(|&t| {
                map.territory(t).troops() >= 2
                    && map
                        .adjacent_to(t)
                        .iter()
                        .any(|&n| map.territory(n).occupier() == Some(self.player))
            })
            .collect();
        if sources.is_empty() {
            self.caps
                .emit(Style::Warning, "You have no armies that can be moved.");
            return Ok(false);
        }

        let Some(source) =
            self.caps
                .choose_territory_or_back(self.session, "Move armies from:", &sources)?
        else {
            return Ok(false);
        };

        let map = self.session.map();
        let targets: Vec<TerritoryId> = map
            .adjacent_to(source)
            .iter()
            .copied()
            .filter(|&n| map.territory(n).occupier() == Some(self.player))
            .collect();
        let Some(target) =
            self.caps
                .choose_territory_or_back(self.session, "Move armies to:", &targets)?
        else {
            return Ok(false);
        };

        let max = map.territory(source).troops() - 1;
        let troops = self.caps.choose_number("How many armies?", 1, max)?;
        if let Err(err) = self.session.fortify(self.player, source, target, troops) {
            self.caps.emit(Style::Error, err.to_string());
            return Ok(false);
        }
        narrate::flush_journal(self.session, self.caps);

        self.check_victory();
        Ok(true)
    }

    fn save(&mut self) -> Result<(), EngineError> {
        let answer = self.caps.ask("Name of the save:")?;
        let name = answer.strip_suffix(".save").unwrap_or(&answer).trim().to_owned();
        if name.is_empty() {
            self.caps.emit(Style::Warning, "The save needs a name.");
            return Ok(());
        }

        let log_name = format!("{name}.log");
        let previous = self.session.replace_log_name(Some(log_name.clone()));

        if let Err(err) = self.caps.persistence.save(self.session, &name) {
            tracing::warn!(%err, save = %name, "saving failed");
            self.session.replace_log_name(previous);
            self.caps
                .emit(Style::Error, format!("Could not save the game: {err}"));
            return Ok(());
        }
        tracing::info!(save = %name, "game saved");

        if let Some(old) = previous.filter(|old| *old != log_name) {
            self.caps.rename_log(&old, &log_name);
        }
        self.caps.log.set_active_log(&log_name);
        self.session.record_saved(&name);
        narrate::flush_journal(self.session, self.caps);

        self.caps
            .emit(Style::Success, format!("Game saved as {name}."));
        self.session.request_return_to_menu();
        Ok(())
    }

    fn check_victory(&mut self) -> bool {
        if !self.session.check_victory(self.player) {
            return false;
        }

        narrate::flush_journal(self.session, self.caps);
        let name = self.name();
        let objective = self.session.player(self.player).objective.clone();
        self.caps.emit(
            Style::Success,
            format!("{name} completed the objective \"{objective}\" and wins the game!"),
        );
        true
    }
}
