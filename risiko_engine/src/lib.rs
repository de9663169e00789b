pub mod capability;
pub mod cards;
pub mod error;
pub mod game_engine;
pub mod narrate;
pub mod prompt;
pub mod setup;
pub mod state;
pub mod turn;
pub mod victory;

pub use error::{EngineError, PersistenceError, RulesError, SetupError};
pub use risiko_shared::MAX_PLAYERS;

pub const MIN_PLAYERS: usize = 2;

/// First round in which players may redeem card combinations.
pub const CARD_REDEMPTION_ROUND: u32 = 4;

pub const MIN_REINFORCEMENT: u32 = 3;

pub const MAX_ATTACK_DICE: u32 = 3;

/// Armies each player starts with, by number of players.
pub const fn starting_armies(players: usize) -> Option<u32> {
    match players {
        2 => Some(40),
        3 => Some(35),
        4 => Some(30),
        5 => Some(25),
        6 => Some(20),
        _ => None,
    }
}
