mod common;

use common::{territory, troops, Frontier};
use risiko_engine::{
    error::RulesError,
    state::action::BonusCard,
};
use risiko_shared::{
    objective::CATALOGUE,
    player::PlayerId,
    record::{MoveAttack, Record},
};

fn attack_move(
    session: &risiko_engine::state::GameSession,
    from: &str,
    to: &str,
    dice: u32,
) -> MoveAttack {
    MoveAttack {
        attacking_territory: territory(session, from),
        defending_territory: territory(session, to),
        attacking_dice: dice,
    }
}

#[test]
fn conquest_moves_troops_and_draws_one_card_per_turn() {
    let mut frontier = Frontier::new(CATALOGUE[5]);
    frontier.set("South Africa", PlayerId::P1, 1);
    let mut session = frontier.session();
    let deck_before = session.deck().len();

    let mov = attack_move(&session, "Egypt", "Congo", 3);
    let outcome = session
        .resolve_attack_with_rolls(PlayerId::P0, mov, vec![6, 6, 6], vec![1])
        .unwrap();
    assert!(outcome.attack.territory_conquered);
    assert!(!outcome.attack.defender_eliminated);
    assert!(matches!(outcome.bonus, Some(BonusCard::Drawn(_))));
    assert_eq!(session.deck().len(), deck_before - 1);

    let congo = territory(&session, "Congo");
    assert_eq!(session.map().territory(congo).occupier(), Some(PlayerId::P0));
    assert_eq!(troops(&session, "Congo"), 0);
    assert_eq!(session.player(PlayerId::P0).conquered_this_turn, 1);

    session
        .move_after_conquest(PlayerId::P0, territory(&session, "Egypt"), congo, 3)
        .unwrap();
    assert_eq!(troops(&session, "Congo"), 3);
    assert_eq!(troops(&session, "Egypt"), 47);

    let mov = attack_move(&session, "Congo", "South Africa", 2);
    let outcome = session
        .resolve_attack_with_rolls(PlayerId::P0, mov, vec![2, 6], vec![5])
        .unwrap();
    assert!(outcome.attack.territory_conquered);
    assert!(outcome.attack.defender_eliminated);
    assert_eq!(outcome.attack.attacker_rolls, [6, 2]);
    assert_eq!(outcome.bonus, None);
    assert_eq!(session.player(PlayerId::P0).cards.len(), 1);
    assert_eq!(session.player(PlayerId::P0).conquered_this_turn, 2);

    let journal = session.drain_journal();
    assert!(journal.contains(&Record::PlayerEliminated(PlayerId::P1)));
}

#[test]
fn two_defending_armies_fall_to_three_sixes() {
    let mut frontier = Frontier::new(CATALOGUE[5]);
    frontier.set("Congo", PlayerId::P1, 2);
    let mut session = frontier.session();
    session.drain_journal();
    let deck_before = session.deck().len();

    let mov = attack_move(&session, "Egypt", "Congo", 3);
    assert_eq!(session.validate_attack(PlayerId::P0, mov), Ok(2));
    let outcome = session
        .resolve_attack_with_rolls(PlayerId::P0, mov, vec![6, 6, 6], vec![1, 1])
        .unwrap();

    assert_eq!(outcome.attack.attacking_lost, 0);
    assert_eq!(outcome.attack.defending_lost, 2);
    assert!(outcome.attack.territory_conquered);
    assert!(outcome.attack.defender_eliminated);

    let egypt = territory(&session, "Egypt");
    let congo = territory(&session, "Congo");
    assert_eq!(session.map().territory(congo).occupier(), Some(PlayerId::P0));
    assert_eq!(troops(&session, "Congo"), 0);
    assert_eq!(session.player(PlayerId::P0).conquered_this_turn, 1);

    assert_eq!(session.player(PlayerId::P0).cards.len(), 1);
    assert_eq!(session.deck().len(), deck_before - 1);
    let draws = session
        .drain_journal()
        .into_iter()
        .filter(|record| matches!(record, Record::DrewCard(_)))
        .count();
    assert_eq!(draws, 1);

    assert_eq!(
        session.move_after_conquest(PlayerId::P0, egypt, congo, 0),
        Err(RulesError::TroopCount {
            requested: 0,
            min: 1,
            max: 49
        })
    );
    session
        .move_after_conquest(PlayerId::P0, egypt, congo, 1)
        .unwrap();
    assert_eq!(troops(&session, "Congo"), 1);
    assert_eq!(troops(&session, "Egypt"), 49);
}

#[test]
fn empty_deck_still_uses_up_the_bonus() {
    let mut frontier = Frontier::new(CATALOGUE[5]);
    frontier.deck = Default::default();
    let mut session = frontier.session();

    let mov = attack_move(&session, "Egypt", "Congo", 1);
    let outcome = session
        .resolve_attack_with_rolls(PlayerId::P0, mov, vec![4], vec![3])
        .unwrap();

    assert_eq!(outcome.bonus, Some(BonusCard::DeckEmpty));
    assert!(session.player(PlayerId::P0).received_bonus_card);
    assert!(session.player(PlayerId::P0).cards.is_empty());
}

#[test]
fn ties_favour_the_defender() {
    let mut frontier = Frontier::new(CATALOGUE[5]);
    frontier.set("Congo", PlayerId::P1, 2);
    let mut session = frontier.session();

    let mov = attack_move(&session, "Egypt", "Congo", 3);
    let outcome = session
        .resolve_attack_with_rolls(PlayerId::P0, mov, vec![4, 6, 5], vec![3, 6])
        .unwrap();

    assert_eq!(outcome.attack.attacking_lost, 1);
    assert_eq!(outcome.attack.defending_lost, 1);
    assert!(!outcome.attack.territory_conquered);
    assert_eq!(troops(&session, "Egypt"), 49);
    assert_eq!(troops(&session, "Congo"), 1);
    assert_eq!(outcome.bonus, None);
}

#[test]
fn defender_rolls_at_most_its_troop_count() {
    let mut frontier = Frontier::new(CATALOGUE[5]);
    frontier.set("Congo", PlayerId::P1, 5);
    let session = frontier.session();

    let three = attack_move(&session, "Egypt", "Congo", 3);
    assert_eq!(session.validate_attack(PlayerId::P0, three), Ok(3));
    let one = attack_move(&session, "Egypt", "Congo", 1);
    assert_eq!(session.validate_attack(PlayerId::P0, one), Ok(1));
}

#[test]
fn random_attacks_respect_the_dice() {
    let mut frontier = Frontier::new(CATALOGUE[5]);
    frontier.set("Congo", PlayerId::P1, 30);
    let mut session = frontier.session();

    for _ in 0..10 {
        let mov = attack_move(&session, "Egypt", "Congo", 3);
        let outcome = session.resolve_attack(PlayerId::P0, mov).unwrap();
        assert_eq!(outcome.attack.attacker_rolls.len(), 3);
        assert_eq!(outcome.attack.defender_rolls.len(), 3);
        assert_eq!(outcome.attack.attacking_lost + outcome.attack.defending_lost, 3);
    }
    assert_eq!(troops(&session, "Egypt") + troops(&session, "Congo"), 50);
}

#[test]
fn illegal_attacks_change_nothing() {
    let mut session = Frontier::new(CATALOGUE[5]).session();
    session.drain_journal();

    let cases = [
        (
            attack_move(&session, "Alaska", "Alberta", 1),
            RulesError::OwnTerritory(territory(&session, "Alberta")),
        ),
        (
            attack_move(&session, "Alaska", "Congo", 1),
            RulesError::NotAdjacent(territory(&session, "Alaska"), territory(&session, "Congo")),
        ),
        (
            attack_move(&session, "Congo", "Egypt", 1),
            RulesError::NotOwner(territory(&session, "Congo")),
        ),
        (
            attack_move(&session, "Egypt", "Congo", 4),
            RulesError::DiceCount {
                requested: 4,
                max: 3,
            },
        ),
        (
            attack_move(&session, "South Africa", "Congo", 1),
            RulesError::DiceCount {
                requested: 1,
                max: 0,
            },
        ),
    ];

    for (mov, expected) in cases {
        assert_eq!(session.resolve_attack(PlayerId::P0, mov), Err(expected));
    }

    let mov = attack_move(&session, "Egypt", "Congo", 2);
    assert_eq!(
        session.resolve_attack_with_rolls(PlayerId::P0, mov, vec![6], vec![1]),
        Err(RulesError::RollCount { expected: 2 })
    );

    assert!(session.drain_journal().is_empty());
    assert_eq!(troops(&session, "Egypt"), 50);
    assert_eq!(troops(&session, "Congo"), 1);
}

#[test]
fn fortify_keeps_one_army_behind() {
    let mut session = Frontier::new(CATALOGUE[5]).session();
    let alaska = territory(&session, "Alaska");
    let alberta = territory(&session, "Alberta");
    let egypt = territory(&session, "Egypt");
    let congo = territory(&session, "Congo");

    assert_eq!(
        session.fortify(PlayerId::P0, alaska, alberta, 5),
        Err(RulesError::TroopCount {
            requested: 5,
            min: 1,
            max: 4
        })
    );
    assert_eq!(
        session.fortify(PlayerId::P0, alaska, egypt, 1),
        Err(RulesError::NotAdjacent(alaska, egypt))
    );
    assert_eq!(
        session.fortify(PlayerId::P0, egypt, congo, 1),
        Err(RulesError::NotOwner(congo))
    );

    session.fortify(PlayerId::P0, alaska, alberta, 4).unwrap();
    assert_eq!(troops(&session, "Alaska"), 1);
    assert_eq!(troops(&session, "Alberta"), 9);
}
