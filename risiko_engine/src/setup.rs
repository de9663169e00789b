use std::cmp::Reverse;

use enum_map::EnumMap;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use risiko_shared::{
    map::TerritoryGraph,
    objective::{ObjectiveCard, CATALOGUE},
    player::{Color, Player, PlayerId},
    record::{Record, StartGame},
};

use crate::{
    capability::{Capabilities, InputClosed, Style},
    cards::Deck,
    error::SetupError,
    starting_armies,
    state::GameSession,
    MAX_PLAYERS, MIN_PLAYERS,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub color: Color,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

impl GameSession {
    /// Starts a new game: deals objectives, rolls for turn order, splits the
    /// territories and shuffles the deck. Everything random derives from
    /// `seed`.
    pub fn new(
        mut map: TerritoryGraph,
        roster: Vec<NewPlayer>,
        seed: u64,
    ) -> Result<Self, SetupError> {
        validate_roster(&roster)?;
        let armies = starting_armies(roster.len()).ok_or(SetupError::PlayerCount(roster.len()))?;
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

        let objectives: Vec<ObjectiveCard> = CATALOGUE
            .choose_multiple(&mut rng, roster.len())
            .map(|&objective| objective.into())
            .collect();
        let mut players: Vec<Player> = roster
            .into_iter()
            .zip(objectives)
            .zip(PlayerId::ALL)
            .map(|((new, objective), id)| Player::new(id, new.name.trim(), new.color, objective, armies))
            .collect();

        let turn_order = determine_turn_order(&mut players, || rng.gen_range(1..=6));
        deal_territories(&mut map, &turn_order, &mut rng);
        let deck = Deck::generate(&map, &mut rng);

        tracing::info!(players = players.len(), seed, "new game");
        let mut session = Self::from_parts(map, players, turn_order.clone(), deck, rng.gen());
        session.commit(Record::StartGame(StartGame { turn_order }));
        Ok(session)
    }
}

fn validate_roster(roster: &[NewPlayer]) -> Result<(), SetupError> {
    if roster.is_empty() {
        return Err(SetupError::EmptyRoster);
    }
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&roster.len()) {
        return Err(SetupError::PlayerCount(roster.len()));
    }

    let mut colors: EnumMap<Color, bool> = EnumMap::default();
    for (i, player) in roster.iter().enumerate() {
        let name = player.name.trim();
        if name.is_empty() {
            return Err(SetupError::EmptyName);
        }
        if roster[..i]
            .iter()
            .any(|other| other.name.trim().to_lowercase() == name.to_lowercase())
        {
            return Err(SetupError::DuplicateName(name.to_owned()));
        }
        if std::mem::replace(&mut colors[player.color], true) {
            return Err(SetupError::DuplicateColor(player.color));
        }
    }
    Ok(())
}

/// Everyone rolls a die; while the highest roll is shared, only the players
/// sharing it roll again. The order is then by last roll, highest first,
/// ties keeping seating order.
pub fn determine_turn_order(
    players: &mut [Player],
    mut roll: impl FnMut() -> u8,
) -> Vec<PlayerId> {
    for player in players.iter_mut() {
        player.last_roll = roll();
    }

    let mut contenders = leaders(players, 0..players.len());
    while contenders.len() > 1 {
        for &i in &contenders {
            players[i].last_roll = roll();
        }
        contenders = leaders(players, contenders);
    }

    let mut order: Vec<&Player> = players.iter().collect();
    order.sort_by_key(|player| Reverse(player.last_roll));
    order.into_iter().map(|player| player.id).collect()
}

fn leaders(players: &[Player], among: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let among: Vec<usize> = among.into_iter().collect();
    let best = among
        .iter()
        .map(|&i| players[i].last_roll)
        .max()
        .unwrap_or_default();
    among
        .into_iter()
        .filter(|&i| players[i].last_roll == best)
        .collect()
}

/// Shuffles the territories and hands out equal blocks in turn order; the
/// remainder goes one each to the first players.
pub fn deal_territories<R: Rng + ?Sized>(
    map: &mut TerritoryGraph,
    turn_order: &[PlayerId],
    rng: &mut R,
) {
    let mut territories: Vec<_> = map.territory_ids().collect();
    territories.shuffle(rng);

    let share = territories.len() / turn_order.len();
    let dealt = share * turn_order.len();
    for (k, territory) in territories.into_iter().enumerate() {
        let owner = if k < dealt {
            turn_order[k / share]
        } else {
            turn_order[k - dealt]
        };
        map.set_occupier(territory, Some(owner));
    }
}

/// Asks for the number of players, their names and their colors.
pub fn gather_roster(caps: &mut Capabilities) -> Result<Vec<NewPlayer>, InputClosed> {
    caps.emit(
        Style::Prompt,
        format!("How many players? ({MIN_PLAYERS}-{MAX_PLAYERS})"),
    );
    let allowed: Vec<i64> = (MIN_PLAYERS as i64..=MAX_PLAYERS as i64).collect();
    let count = caps.input.read_int_among(&allowed)? as usize;

    let mut names: Vec<String> = Vec::with_capacity(count);
    for i in 1..=count {
        loop {
            let name = caps.ask(&format!("Name of player {i}:"))?;
            if names
                .iter()
                .any(|taken| taken.to_lowercase() == name.to_lowercase())
            {
                caps.emit(Style::Warning, format!("{name} is already taken."));
                continue;
            }
            names.push(name);
            break;
        }
    }

    let mut taken: EnumMap<Color, bool> = EnumMap::default();
    let mut roster = Vec::with_capacity(count);
    for name in names {
        let available: Vec<Color> = Color::ALL.into_iter().filter(|&c| !taken[c]).collect();
        let labels: Vec<String> = available.iter().map(|c| c.to_string()).collect();
        let color = available[caps.choose(&format!("{name}, choose your color:"), &labels)?];
        taken[color] = true;
        roster.push(NewPlayer::new(name, color));
    }

    Ok(roster)
}
