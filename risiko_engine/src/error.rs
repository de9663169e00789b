use std::io;

use risiko_shared::{map::TerritoryId, player::Color, MapError};
use thiserror::Error;

use crate::{capability::InputClosed, MAX_PLAYERS, MIN_PLAYERS};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(
        "a game needs between {min} and {max} players, got {0}",
        min = MIN_PLAYERS,
        max = MAX_PLAYERS
    )]
    PlayerCount(usize),
    #[error("no players were given")]
    EmptyRoster,
    #[error("player names cannot be empty")]
    EmptyName,
    #[error("the name {0} is already taken")]
    DuplicateName(String),
    #[error("the color {0} is already taken")]
    DuplicateColor(Color),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardSelectionError {
    #[error("choose exactly 3 cards, got {0}")]
    WrongCount(usize),
    #[error("{0:?} is not a card number")]
    NotANumber(String),
    #[error("there is no card number {0}")]
    OutOfRange(usize),
    #[error("card number {0} was chosen twice")]
    Duplicate(usize),
    #[error("those cards do not form a valid combination")]
    InvalidCombination,
}

/// A requested action that the rules do not allow. The state is left
/// untouched whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("territory {0:?} is not held by the acting player")]
    NotOwner(TerritoryId),
    #[error("territory {0:?} is already held by the acting player")]
    OwnTerritory(TerritoryId),
    #[error("territories {0:?} and {1:?} do not border each other")]
    NotAdjacent(TerritoryId, TerritoryId),
    #[error("cannot roll {requested} dice, at most {max} allowed")]
    DiceCount { requested: u32, max: u32 },
    #[error("expected {expected} dice values")]
    RollCount { expected: usize },
    #[error("cannot move {requested} armies, allowed range is {min}..={max}")]
    TroopCount { requested: u32, min: u32, max: u32 },
    #[error("no armies left to place")]
    NoArmiesLeft,
    #[error(transparent)]
    Cards(#[from] CardSelectionError),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed save: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no saved game named {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    InputClosed(#[from] InputClosed),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
