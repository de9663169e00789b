pub mod error;
pub mod map;
pub mod objective;
pub mod player;
pub mod record;

pub use error::{MapError, UnknownObjective};
pub use player::MAX_PLAYERS;

use std::fmt;

use map::TerritoryId;

/// Wildcards added to the deck on top of one card per territory.
pub const WILDCARD_COUNT: usize = 2;

/// A territory card. Troop cards always name a territory, wildcards never do.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    symbol: CardSymbol,
    territory: Option<TerritoryId>,
}

impl Card {
    pub const WILD: Self = Self {
        symbol: CardSymbol::Wildcard,
        territory: None,
    };

    pub fn new(territory: TerritoryId, symbol: CardSymbol) -> Option<Self> {
        (symbol != CardSymbol::Wildcard).then_some(Self {
            symbol,
            territory: Some(territory),
        })
    }

    pub fn symbol(self) -> CardSymbol {
        self.symbol
    }

    pub fn territory(self) -> Option<TerritoryId> {
        self.territory
    }

    pub fn is_wild(self) -> bool {
        self.symbol == CardSymbol::Wildcard
    }
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, enum_map::Enum, enumn::N)]
#[cfg_attr(
    feature = "serde",
    derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr)
)]
pub enum CardSymbol {
    Artillery,
    Infantry,
    Cavalry,
    Wildcard,
}

impl CardSymbol {
    pub const TROOPS: [Self; 3] = [Self::Artillery, Self::Infantry, Self::Cavalry];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Artillery => "Artillery",
            Self::Infantry => "Infantry",
            Self::Cavalry => "Cavalry",
            Self::Wildcard => "Wildcard",
        }
    }
}

impl fmt::Display for CardSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A redeemable three-card combination.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CardSet {
    Triple(CardSymbol),
    OneOfEach,
    WildPair(CardSymbol),
}

impl CardSet {
    pub const fn base_bonus(self) -> u32 {
        match self {
            Self::Triple(CardSymbol::Artillery) => 4,
            Self::Triple(CardSymbol::Infantry) => 6,
            Self::Triple(CardSymbol::Cavalry) => 8,
            Self::Triple(CardSymbol::Wildcard) => 0,
            Self::OneOfEach => 10,
            Self::WildPair(_) => 12,
        }
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triple(symbol) => write!(f, "three {symbol}"),
            Self::OneOfEach => f.write_str("one Artillery, one Infantry and one Cavalry"),
            Self::WildPair(symbol) => write!(f, "a Wildcard and two {symbol}"),
        }
    }
}
