mod mov;

use crate::{
    map::{ContinentId, TerritoryId},
    player::PlayerId,
    Card, CardSet,
};
pub use mov::*;

/// Everything that happens in a game, in order. Applying the records of a
/// game to its starting state reproduces the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    StartGame(StartGame),
    StartTurn(StartTurn),
    RedeemedCards(RedeemedCards),
    Attack(Attack),
    DrewCard(DrewCard),
    DeckEmpty(PlayerId),
    PlayerEliminated(PlayerId),
    Saved(String),
    Winner(PlayerId),
    Move(PlayerId, Move),
}

impl Record {
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Record::StartGame(_) | Record::Saved(_) => None,
            Record::StartTurn(v) => Some(v.player),
            Record::RedeemedCards(v) => Some(v.player),
            Record::Attack(v) => Some(v.attacker),
            Record::DrewCard(v) => Some(v.player),
            Record::DeckEmpty(p)
            | Record::PlayerEliminated(p)
            | Record::Winner(p)
            | Record::Move(p, _) => Some(*p),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartGame {
    pub turn_order: Vec<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartTurn {
    pub player: PlayerId,
    pub territories_held: u32,
    pub continents_held: Vec<ContinentId>,
    pub territory_bonus: u32,
    pub continent_bonus: u32,
}

impl StartTurn {
    pub fn total(&self) -> u32 {
        self.territory_bonus + self.continent_bonus
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeemedCards {
    pub player: PlayerId,
    pub hand_indices: [usize; 3],
    pub cards: [Card; 3],
    pub set: CardSet,
    /// Two armies for each redeemed card naming a territory the player owns.
    pub territory_bonus: u32,
}

impl RedeemedCards {
    pub fn total(&self) -> u32 {
        self.set.base_bonus() + self.territory_bonus
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attack {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub mov: MoveAttack,
    pub attacker_rolls: Vec<u8>,
    pub defender_rolls: Vec<u8>,
    pub attacking_lost: u32,
    pub defending_lost: u32,
    pub territory_conquered: bool,
    pub defender_eliminated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrewCard {
    pub player: PlayerId,
    pub card: Card,
}
