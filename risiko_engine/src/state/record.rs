use rand::Rng;
use risiko_shared::{
    map::TerritoryGraph,
    player::PlayerId,
    record::{Attack, DrewCard, MoveAttack, Record, RedeemedCards, StartTurn},
};

use super::GameSession;
use crate::{cards, error::CardSelectionError, MIN_REINFORCEMENT};

pub fn start_turn(map: &TerritoryGraph, player: PlayerId) -> StartTurn {
    let territories_held = map.territories_owned_by(player).len() as u32;
    let continents_held = map.continents_owned_by(player);

    let territory_bonus = std::cmp::max(MIN_REINFORCEMENT, territories_held / 3);
    let continent_bonus = continents_held
        .iter()
        .map(|&c| map.continent(c).bonus())
        .sum();

    StartTurn {
        player,
        territories_held,
        continents_held,
        territory_bonus,
        continent_bonus,
    }
}

/// Losses for each side when the sorted rolls are compared pairwise. Ties
/// go to the defender.
pub fn exchange(attacker_rolls: &[u8], defender_rolls: &[u8]) -> (u32, u32) {
    let attacking_lost = attacker_rolls
        .iter()
        .zip(defender_rolls)
        .filter(|(x, y)| x <= y)
        .count() as u32;
    let defending_lost = attacker_rolls
        .iter()
        .zip(defender_rolls)
        .filter(|(x, y)| x > y)
        .count() as u32;

    (attacking_lost, defending_lost)
}

pub fn attack(
    state: &GameSession,
    player: PlayerId,
    mov: MoveAttack,
    mut attacker_rolls: Vec<u8>,
    mut defender_rolls: Vec<u8>,
) -> Attack {
    sort_descending(&mut attacker_rolls);
    sort_descending(&mut defender_rolls);
    let (attacking_lost, defending_lost) = exchange(&attacker_rolls, &defender_rolls);

    let defending_territory = state.map.territory(mov.defending_territory);
    let defender = defending_territory.occupier().unwrap_or(player);
    let territory_conquered = defending_lost >= defending_territory.troops();
    let defender_eliminated = territory_conquered
        && !state
            .map
            .territories()
            .any(|(id, t)| t.occupier() == Some(defender) && id != mov.defending_territory);

    Attack {
        attacker: player,
        defender,
        mov,
        attacker_rolls,
        defender_rolls,
        attacking_lost,
        defending_lost,
        territory_conquered,
        defender_eliminated,
    }
}

pub fn redeemed_cards(
    state: &GameSession,
    player: PlayerId,
    hand_indices: [usize; 3],
) -> Result<RedeemedCards, CardSelectionError> {
    let hand = &state.player(player).cards;
    for (i, &index) in hand_indices.iter().enumerate() {
        if index >= hand.len() {
            return Err(CardSelectionError::OutOfRange(index + 1));
        }
        if hand_indices[..i].contains(&index) {
            return Err(CardSelectionError::Duplicate(index + 1));
        }
    }

    let cards = hand_indices.map(|i| hand[i]);
    let set = cards::classify(&cards).ok_or(CardSelectionError::InvalidCombination)?;

    Ok(RedeemedCards {
        player,
        hand_indices,
        cards,
        set,
        territory_bonus: cards::territory_bonus(&state.map, player, &cards),
    })
}

/// Draws the conquest bonus card, if the deck still has one.
pub fn drew_card(state: &mut GameSession, player: PlayerId) -> Record {
    match state.deck.draw() {
        Some(card) => Record::DrewCard(DrewCard { player, card }),
        None => Record::DeckEmpty(player),
    }
}

pub fn roll_sorted<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<u8> {
    let mut rolls = std::iter::repeat_with(|| rng.gen_range(1..=6))
        .take(count as usize)
        .collect::<Vec<u8>>();

    sort_descending(&mut rolls);
    rolls
}

fn sort_descending(rolls: &mut [u8]) {
    rolls.sort_unstable_by_key(|&x| std::cmp::Reverse(x));
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use risiko_shared::map;

    use super::*;

    #[test]
    fn test_exchange_examples() {
        assert_eq!(exchange(&[6, 5, 4], &[6, 3]), (1, 1));
        assert_eq!(exchange(&[6, 6, 6], &[1, 1]), (0, 2));
        assert_eq!(exchange(&[2], &[2, 1]), (1, 0));
        assert_eq!(exchange(&[5, 1], &[4]), (0, 1));
    }

    #[test]
    fn test_reinforcement_has_a_floor_of_three() {
        let mut map = map::classic().unwrap();
        let europe = map.find_continent("Europe").unwrap();
        let ids: Vec<_> = map.territory_ids().collect();
        for &id in &ids[..4] {
            map.set_occupier(id, Some(PlayerId::P0));
        }
        let turn = start_turn(&map, PlayerId::P0);
        assert_eq!(turn.total(), 3);
        assert!(turn.continents_held.is_empty());

        for id in map.territories_of(europe).to_vec() {
            map.set_occupier(id, Some(PlayerId::P1));
        }
        for &id in &ids[16..26] {
            map.set_occupier(id, Some(PlayerId::P1));
        }
        let turn = start_turn(&map, PlayerId::P1);
        assert_eq!(turn.territories_held, 17);
        assert_eq!(turn.territory_bonus, 5);
        assert_eq!(turn.continent_bonus, 5);
        assert_eq!(turn.total(), 10);
    }

    #[test]
    fn test_rolls_are_sorted_dice() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for count in 1..=3 {
            let rolls = roll_sorted(&mut rng, count);
            assert_eq!(rolls.len(), count as usize);
            assert!(rolls.iter().all(|r| (1..=6).contains(r)));
            assert!(rolls.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    proptest! {
        #[test]
        fn prop_exchange_costs_one_army_per_pair(
            attacker in prop::collection::vec(1u8..=6, 1..=3),
            defender in prop::collection::vec(1u8..=6, 1..=2),
        ) {
            let mut attacker = attacker;
            let mut defender = defender;
            sort_descending(&mut attacker);
            sort_descending(&mut defender);
            let (a, d) = exchange(&attacker, &defender);
            prop_assert_eq!((a + d) as usize, attacker.len().min(defender.len()));
        }
    }
}
