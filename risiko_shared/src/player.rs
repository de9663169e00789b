use std::fmt;

use crate::{objective::ObjectiveCard, Card};

pub const MAX_PLAYERS: usize = 6;

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, enumn::N, enum_map::Enum)]
#[cfg_attr(
    feature = "serde",
    derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr)
)]
pub enum PlayerId {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl PlayerId {
    pub const ALL: [PlayerId; MAX_PLAYERS] = [
        PlayerId::P0,
        PlayerId::P1,
        PlayerId::P2,
        PlayerId::P3,
        PlayerId::P4,
        PlayerId::P5,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::n)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, enumn::N, enum_map::Enum)]
#[cfg_attr(
    feature = "serde",
    derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr)
)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; MAX_PLAYERS] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Black,
        Color::White,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    pub objective: ObjectiveCard,
    /// Armies still to place during initial deployment.
    pub armies: u32,
    pub cards: Vec<Card>,
    pub last_roll: u8,
    /// Armies the player has deployed so far, initial and reinforcement.
    pub total_armies: u32,
    pub conquered_this_turn: u32,
    pub received_bonus_card: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        color: Color,
        objective: ObjectiveCard,
        armies: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            objective,
            armies,
            cards: Vec::new(),
            last_roll: 0,
            total_armies: 0,
            conquered_this_turn: 0,
            received_bonus_card: false,
        }
    }
}
