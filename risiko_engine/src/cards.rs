use std::collections::VecDeque;

use enum_map::EnumMap;
use rand::{seq::SliceRandom, Rng};
use risiko_shared::{
    map::TerritoryGraph, player::PlayerId, Card, CardSet, CardSymbol, WILDCARD_COUNT,
};
use serde::{Deserialize, Serialize};

use crate::error::CardSelectionError;

/// Draw pile. Cards are drawn from the front; redeemed cards go back in and
/// the whole pile is reshuffled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// One card per territory with a random troop symbol, plus the wildcards.
    pub fn generate<R: Rng + ?Sized>(map: &TerritoryGraph, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = map
            .territory_ids()
            .filter_map(|id| {
                let symbol = CardSymbol::TROOPS[rng.gen_range(0..CardSymbol::TROOPS.len())];
                Card::new(id, symbol)
            })
            .collect();
        cards.extend([Card::WILD; WILDCARD_COUNT]);
        cards.shuffle(rng);

        Self {
            cards: cards.into(),
        }
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn return_cards<R: Rng + ?Sized>(
        &mut self,
        cards: impl IntoIterator<Item = Card>,
        rng: &mut R,
    ) {
        self.cards.extend(cards);
        self.cards.make_contiguous().shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

pub fn classify(cards: &[Card; 3]) -> Option<CardSet> {
    let mut counts: EnumMap<CardSymbol, usize> = EnumMap::default();
    for card in cards {
        counts[card.symbol()] += 1;
    }

    match counts[CardSymbol::Wildcard] {
        0 => {
            if CardSymbol::TROOPS.iter().all(|&s| counts[s] == 1) {
                Some(CardSet::OneOfEach)
            } else {
                CardSymbol::TROOPS
                    .into_iter()
                    .find(|&s| counts[s] == 3)
                    .map(CardSet::Triple)
            }
        }
        1 => CardSymbol::TROOPS
            .into_iter()
            .find(|&s| counts[s] == 2)
            .map(CardSet::WildPair),
        _ => None,
    }
}

/// Two armies for every card in the set naming a territory `player` owns.
pub fn territory_bonus(map: &TerritoryGraph, player: PlayerId, cards: &[Card; 3]) -> u32 {
    cards
        .iter()
        .filter_map(|card| card.territory())
        .filter(|&t| map.territory(t).occupier() == Some(player))
        .count() as u32
        * 2
}

/// Finds some valid combination in `hand`, as hand positions.
pub fn find_set(hand: &[Card]) -> Option<[usize; 3]> {
    let mut by_symbol: EnumMap<CardSymbol, Vec<usize>> = EnumMap::default();
    for (index, card) in hand.iter().enumerate() {
        by_symbol[card.symbol()].push(index);
    }

    if CardSymbol::TROOPS.iter().all(|&s| !by_symbol[s].is_empty()) {
        let [a, b, c] = CardSymbol::TROOPS.map(|s| by_symbol[s][0]);
        return Some([a, b, c]);
    }

    for symbol in CardSymbol::TROOPS {
        let same = &by_symbol[symbol];
        if same.len() >= 3 {
            return Some([same[0], same[1], same[2]]);
        }
    }

    let wilds = &by_symbol[CardSymbol::Wildcard];
    for symbol in CardSymbol::TROOPS {
        let same = &by_symbol[symbol];
        if same.len() >= 2 && !wilds.is_empty() {
            return Some([same[0], same[1], wilds[0]]);
        }
    }

    None
}

pub fn has_valid_set(hand: &[Card]) -> bool {
    find_set(hand).is_some()
}

/// Parses a line like `"1 3 4"` into zero-based hand positions forming a
/// valid combination.
pub fn parse_card_selection(line: &str, hand: &[Card]) -> Result<[usize; 3], CardSelectionError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(CardSelectionError::WrongCount(tokens.len()));
    }

    let mut indices = [0; 3];
    for (slot, token) in indices.iter_mut().zip(&tokens) {
        let number: usize = token
            .parse()
            .map_err(|_| CardSelectionError::NotANumber((*token).to_owned()))?;
        if number == 0 || number > hand.len() {
            return Err(CardSelectionError::OutOfRange(number));
        }
        *slot = number - 1;
    }

    for i in 0..3 {
        if indices[..i].contains(&indices[i]) {
            return Err(CardSelectionError::Duplicate(indices[i] + 1));
        }
    }

    let cards = indices.map(|i| hand[i]);
    classify(&cards).ok_or(CardSelectionError::InvalidCombination)?;
    Ok(indices)
}
