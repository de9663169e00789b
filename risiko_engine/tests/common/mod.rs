#![allow(dead_code)]

use risiko_engine::{
    capability::{
        memory::{MemoryLog, MemorySaves, RecordingOutput, ScriptedInput},
        Capabilities,
    },
    cards::Deck,
    state::GameSession,
};
use risiko_shared::{
    map::{TerritoryGraph, TerritoryId},
    objective::{Objective, CATALOGUE},
    player::{Color, Player, PlayerId},
    Card,
};

pub struct Harness {
    pub caps: Capabilities,
    pub output: RecordingOutput,
    pub saves: MemorySaves,
    pub log: MemoryLog,
}

pub fn harness<I, S>(lines: I) -> Harness
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let output = RecordingOutput::default();
    let saves = MemorySaves::default();
    let log = MemoryLog::default();
    let caps = Capabilities::new(
        ScriptedInput::new(lines),
        output.clone(),
        saves.clone(),
        log.clone(),
    );

    Harness {
        caps,
        output,
        saves,
        log,
    }
}

pub fn repeat(line: &str, times: u32) -> impl Iterator<Item = String> + '_ {
    (0..times).map(move |_| line.to_owned())
}

/// Two continents on a line:
/// Alaska - Alberta - Egypt - Congo - South Africa.
pub fn frontier_map() -> TerritoryGraph {
    let mut builder = TerritoryGraph::builder();
    let north_america = builder.continent("North America", 5).unwrap();
    let africa = builder.continent("Africa", 3).unwrap();
    for name in ["Alaska", "Alberta"] {
        builder.territory(north_america, name).unwrap();
    }
    for name in ["Egypt", "Congo", "South Africa"] {
        builder.territory(africa, name).unwrap();
    }
    for (a, b) in [
        ("Alaska", "Alberta"),
        ("Alberta", "Egypt"),
        ("Egypt", "Congo"),
        ("Congo", "South Africa"),
    ] {
        builder.connect_names(a, b).unwrap();
    }
    builder.build().unwrap()
}

pub struct Frontier {
    pub map: TerritoryGraph,
    pub players: Vec<Player>,
    pub deck: Deck,
}

impl Frontier {
    /// Ada (P0) holds everything but Congo, which Bo (P1) holds.
    pub fn new(objective: Objective) -> Self {
        let mut map = frontier_map();
        for (name, owner, troops) in [
            ("Alaska", PlayerId::P0, 5),
            ("Alberta", PlayerId::P0, 5),
            ("Egypt", PlayerId::P0, 50),
            ("Congo", PlayerId::P1, 1),
            ("South Africa", PlayerId::P0, 1),
        ] {
            let id = map.find_territory(name).unwrap();
            map.set_occupier(id, Some(owner));
            map.set_troops(id, troops);
        }

        let players = vec![
            Player::new(PlayerId::P0, "Ada", Color::Red, objective.into(), 0),
            Player::new(PlayerId::P1, "Bo", Color::Blue, CATALOGUE[5].into(), 0),
        ];
        let deck = Deck::from_cards(
            map.territory_ids()
                .filter_map(|id| Card::new(id, risiko_shared::CardSymbol::Cavalry)),
        );

        Self { map, players, deck }
    }

    pub fn set(&mut self, name: &str, owner: PlayerId, troops: u32) -> &mut Self {
        let id = self.id(name);
        self.map.set_occupier(id, Some(owner));
        self.map.set_troops(id, troops);
        self
    }

    pub fn id(&self, name: &str) -> TerritoryId {
        self.map.find_territory(name).unwrap()
    }

    pub fn session(self) -> GameSession {
        let mut session = GameSession::from_parts(
            self.map,
            self.players,
            vec![PlayerId::P0, PlayerId::P1],
            self.deck,
            17,
        );
        session.mark_armies_distributed();
        session.set_log_name("frontier.log");
        session
    }
}

pub fn territory(session: &GameSession, name: &str) -> TerritoryId {
    session.map().find_territory(name).unwrap()
}

pub fn troops(session: &GameSession, name: &str) -> u32 {
    session.map().territory(territory(session, name)).troops()
}
