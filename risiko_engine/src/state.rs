pub mod action;
pub mod mutate;
pub mod record;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use risiko_shared::{
    map::{TerritoryGraph, TerritoryId},
    player::{Player, PlayerId},
    record::Record,
};
use serde::{de::Error as _, Deserialize, Serialize};

use crate::{cards::Deck, error::PersistenceError, turn::TurnState};

/// The complete state of a game in progress. This is exactly what a save
/// file contains.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameSession {
    map: TerritoryGraph,
    players: Vec<Player>,
    turn_order: Vec<PlayerId>,
    deck: Deck,
    current: usize,
    #[serde(default)]
    turn: TurnState,
    #[serde(default = "first_round")]
    round: u32,
    armies_distributed: bool,
    in_progress: bool,
    #[serde(default)]
    winner: Option<PlayerId>,
    #[serde(skip)]
    return_to_menu: bool,
    #[serde(skip)]
    resumed: bool,
    #[serde(default)]
    log_name: Option<String>,
    #[serde(default = "fresh_rng")]
    rng: Xoshiro256StarStar,
    #[serde(skip)]
    journal: Vec<Record>,
}

fn first_round() -> u32 {
    1
}

fn fresh_rng() -> Xoshiro256StarStar {
    Xoshiro256StarStar::from_rng(rand::thread_rng())
        .unwrap_or_else(|_| Xoshiro256StarStar::seed_from_u64(rand::random()))
}

impl GameSession {
    /// Assembles a session from prepared parts. `players` must be indexed by
    /// [`PlayerId`] and `turn_order` must name each of them once.
    pub fn from_parts(
        map: TerritoryGraph,
        players: Vec<Player>,
        turn_order: Vec<PlayerId>,
        deck: Deck,
        seed: u64,
    ) -> Self {
        Self {
            map,
            players,
            turn_order,
            deck,
            current: 0,
            turn: TurnState::default(),
            round: first_round(),
            armies_distributed: false,
            in_progress: true,
            winner: None,
            return_to_menu: false,
            resumed: false,
            log_name: None,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            journal: Vec::new(),
        }
    }

    pub fn map(&self) -> &TerritoryGraph {
        &self.map
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn_order[self.current]
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn armies_distributed(&self) -> bool {
        self.armies_distributed
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn return_to_menu(&self) -> bool {
        self.return_to_menu
    }

    /// Set on sessions produced by [`GameSession::decode`] until the first
    /// turn after loading has announced itself.
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    pub fn log_name(&self) -> Option<&str> {
        self.log_name.as_deref()
    }

    pub fn territories_of(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.map.territories_owned_by(player)
    }

    pub fn set_log_name(&mut self, name: impl Into<String>) {
        self.log_name = Some(name.into());
    }

    /// Swaps in `name` and hands back the previous log name.
    pub(crate) fn replace_log_name(&mut self, name: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.log_name, name)
    }

    pub fn mark_armies_distributed(&mut self) {
        self.armies_distributed = true;
    }

    pub fn request_return_to_menu(&mut self) {
        self.return_to_menu = true;
    }

    pub fn clear_resumed(&mut self) {
        self.resumed = false;
    }

    /// Passes play to the next player. Returns `true` when that wraps
    /// around and a new round begins.
    pub fn advance_turn(&mut self) -> bool {
        self.turn = TurnState::default();
        self.current = (self.current + 1) % self.turn_order.len();
        if self.current == 0 {
            self.round += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn turn_mut(&mut self) -> &mut TurnState {
        &mut self.turn
    }

    pub(crate) fn rng(&mut self) -> &mut Xoshiro256StarStar {
        &mut self.rng
    }

    /// Records committed since the last call, oldest first.
    pub fn drain_journal(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.journal)
    }

    pub fn encode(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn decode(blob: &str) -> Result<Self, PersistenceError> {
        let mut session: Self = serde_json::from_str(blob)?;
        session
            .check_consistency()
            .map_err(|reason| PersistenceError::Decode(serde_json::Error::custom(reason)))?;
        session.round = session.round.max(first_round());
        session.resumed = true;
        Ok(session)
    }

    /// Indices a save could get wrong that every accessor relies on.
    fn check_consistency(&self) -> Result<(), String> {
        self.map.check_references().map_err(|err| err.to_string())?;

        for (index, player) in self.players.iter().enumerate() {
            if player.id.index() != index {
                return Err(format!("player {index} is stored as {:?}", player.id));
            }
        }
        if self.turn_order.is_empty() {
            return Err("the turn order is empty".to_owned());
        }
        if self.current >= self.turn_order.len() {
            return Err(format!(
                "current turn {} is past the turn order of {}",
                self.current,
                self.turn_order.len()
            ));
        }

        let known = |player: PlayerId| player.index() < self.players.len();
        if let Some(player) = self.turn_order.iter().copied().find(|&p| !known(p)) {
            return Err(format!("{player:?} in the turn order has no player entry"));
        }
        if let Some(winner) = self.winner.filter(|&p| !known(p)) {
            return Err(format!("winner {winner:?} has no player entry"));
        }
        for (_, territory) in self.map.territories() {
            if let Some(player) = territory.occupier().filter(|&p| !known(p)) {
                return Err(format!(
                    "{} is held by {player:?}, who has no player entry",
                    territory.name()
                ));
            }
        }

        let cards = self
            .players
            .iter()
            .flat_map(|player| player.cards.iter())
            .chain(self.deck.iter());
        for card in cards {
            if let Some(territory) = card.territory().filter(|t| t.index() >= self.map.len()) {
                return Err(format!(
                    "a card names territory #{}, which is not on the map",
                    territory.index()
                ));
            }
        }
        Ok(())
    }
}
