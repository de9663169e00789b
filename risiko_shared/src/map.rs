use crate::{error::MapError, player::PlayerId};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TerritoryId(u16);

impl TerritoryId {
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ContinentId(u8);

impl ContinentId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Territory {
    name: String,
    continent: ContinentId,
    occupier: Option<PlayerId>,
    troops: u32,
    adjacent: Vec<TerritoryId>,
}

impl Territory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn continent(&self) -> ContinentId {
        self.continent
    }

    pub fn occupier(&self) -> Option<PlayerId> {
        self.occupier
    }

    pub fn troops(&self) -> u32 {
        self.troops
    }

    pub fn adjacent(&self) -> &[TerritoryId] {
        &self.adjacent
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Continent {
    name: String,
    bonus: u32,
    territories: Vec<TerritoryId>,
}

impl Continent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn territories(&self) -> &[TerritoryId] {
        &self.territories
    }
}

/// The board: an undirected border graph over territories, each belonging to
/// exactly one continent.
///
/// Topology is fixed once built; only occupiers and troop counts change.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerritoryGraph {
    continents: Vec<Continent>,
    territories: Vec<Territory>,
}

impl TerritoryGraph {
    pub fn builder() -> MapBuilder {
        MapBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id.index()]
    }

    pub fn territory_ids(&self) -> impl Iterator<Item = TerritoryId> {
        (0..self.territories.len() as u16).map(TerritoryId)
    }

    pub fn territories(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territory_ids().zip(self.territories.iter())
    }

    pub fn continent(&self, id: ContinentId) -> &Continent {
        &self.continents[id.index()]
    }

    pub fn continents(&self) -> impl Iterator<Item = (ContinentId, &Continent)> {
        (0..self.continents.len() as u8)
            .map(ContinentId)
            .zip(self.continents.iter())
    }

    pub fn find_territory(&self, name: &str) -> Option<TerritoryId> {
        let name = name.trim();
        self.territories()
            .find(|(_, territory)| territory.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    pub fn find_continent(&self, name: &str) -> Option<ContinentId> {
        let name = name.trim();
        self.continents()
            .find(|(_, continent)| continent.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    pub fn adjacent_to(&self, id: TerritoryId) -> &[TerritoryId] {
        &self.territory(id).adjacent
    }

    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.adjacent_to(a).contains(&b)
    }

    pub fn territories_of(&self, continent: ContinentId) -> &[TerritoryId] {
        &self.continent(continent).territories
    }

    pub fn owns_all_of(&self, player: PlayerId, continent: ContinentId) -> bool {
        self.territories_of(continent)
            .iter()
            .all(|&id| self.territory(id).occupier == Some(player))
    }

    pub fn territories_owned_by(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.territories()
            .filter(|(_, territory)| territory.occupier == Some(player))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn continents_owned_by(&self, player: PlayerId) -> Vec<ContinentId> {
        self.continents()
            .map(|(id, _)| id)
            .filter(|&id| self.owns_all_of(player, id))
            .collect()
    }

    /// Re-checks the indices of a graph that did not come out of
    /// [`MapBuilder`], such as one read back from a save.
    pub fn check_references(&self) -> Result<(), MapError> {
        let len = self.territories.len();
        let unknown = |id: TerritoryId| MapError::UnknownTerritory(format!("#{}", id.index()));

        if self.continents.is_empty() {
            return Err(MapError::NoContinents);
        }
        for continent in &self.continents {
            if continent.territories.is_empty() {
                return Err(MapError::EmptyContinent(continent.name.clone()));
            }
            if let Some(&id) = continent.territories.iter().find(|id| id.index() >= len) {
                return Err(unknown(id));
            }
        }
        for territory in &self.territories {
            if territory.continent.index() >= self.continents.len() {
                return Err(MapError::UnknownContinent(territory.name.clone()));
            }
            if let Some(&id) = territory.adjacent.iter().find(|id| id.index() >= len) {
                return Err(unknown(id));
            }
        }
        Ok(())
    }

    pub fn set_occupier(&mut self, id: TerritoryId, player: Option<PlayerId>) {
        self.territories[id.index()].occupier = player;
    }

    pub fn add_troops(&mut self, id: TerritoryId, troops: u32) {
        self.territories[id.index()].troops += troops;
    }

    /// Returns `false` and leaves the count untouched when fewer than
    /// `troops` are stationed.
    pub fn remove_troops(&mut self, id: TerritoryId, troops: u32) -> bool {
        let territory = &mut self.territories[id.index()];
        match territory.troops.checked_sub(troops) {
            Some(remaining) => {
                territory.troops = remaining;
                true
            }
            None => false,
        }
    }

    pub fn set_troops(&mut self, id: TerritoryId, troops: u32) {
        self.territories[id.index()].troops = troops;
    }
}

#[derive(Debug, Default)]
pub struct MapBuilder {
    continents: Vec<Continent>,
    territories: Vec<Territory>,
}

impl MapBuilder {
    pub fn continent(&mut self, name: &str, bonus: u32) -> Result<ContinentId, MapError> {
        let name = name.trim();
        if self
            .continents
            .iter()
            .any(|continent| continent.name.eq_ignore_ascii_case(name))
        {
            return Err(MapError::DuplicateContinent(name.to_owned()));
        }

        self.continents.push(Continent {
            name: name.to_owned(),
            bonus,
            territories: Vec::new(),
        });
        Ok(ContinentId(self.continents.len() as u8 - 1))
    }

    pub fn territory(
        &mut self,
        continent: ContinentId,
        name: &str,
    ) -> Result<TerritoryId, MapError> {
        let name = name.trim();
        if self.lookup(name).is_some() {
            return Err(MapError::DuplicateTerritory(name.to_owned()));
        }

        let id = TerritoryId(self.territories.len() as u16);
        self.territories.push(Territory {
            name: name.to_owned(),
            continent,
            occupier: None,
            troops: 0,
            adjacent: Vec::new(),
        });
        self.continents[continent.index()].territories.push(id);
        Ok(id)
    }

    /// Adds a border in both directions. Connecting an existing border again
    /// is a no-op.
    pub fn connect(&mut self, a: TerritoryId, b: TerritoryId) -> Result<(), MapError> {
        if a == b {
            return Err(MapError::SelfAdjacent(self.territories[a.index()].name.clone()));
        }

        for (from, to) in [(a, b), (b, a)] {
            let adjacent = &mut self.territories[from.index()].adjacent;
            if !adjacent.contains(&to) {
                adjacent.push(to);
            }
        }
        Ok(())
    }

    pub fn connect_names(&mut self, a: &str, b: &str) -> Result<(), MapError> {
        let a = self
            .lookup(a)
            .ok_or_else(|| MapError::UnknownTerritory(a.to_owned()))?;
        let b = self
            .lookup(b)
            .ok_or_else(|| MapError::UnknownTerritory(b.to_owned()))?;
        self.connect(a, b)
    }

    pub fn build(self) -> Result<TerritoryGraph, MapError> {
        if self.continents.is_empty() {
            return Err(MapError::NoContinents);
        }
        if let Some(empty) = self.continents.iter().find(|c| c.territories.is_empty()) {
            return Err(MapError::EmptyContinent(empty.name.clone()));
        }

        Ok(TerritoryGraph {
            continents: self.continents,
            territories: self.territories,
        })
    }

    fn lookup(&self, name: &str) -> Option<TerritoryId> {
        let name = name.trim();
        self.territories
            .iter()
            .position(|territory| territory.name.eq_ignore_ascii_case(name))
            .map(|index| TerritoryId(index as u16))
    }
}

pub fn classic_continent_bonus(name: &str) -> Option<u32> {
    CLASSIC_CONTINENTS
        .iter()
        .find(|(continent, ..)| continent.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, bonus, _)| bonus)
}

/// The standard 42-territory board.
pub fn classic() -> Result<TerritoryGraph, MapError> {
    let mut builder = TerritoryGraph::builder();
    for (continent, bonus, territories) in CLASSIC_CONTINENTS {
        let id = builder.continent(continent, bonus)?;
        for territory in territories {
            builder.territory(id, territory)?;
        }
    }
    for (a, b) in CLASSIC_BORDERS {
        builder.connect_names(a, b)?;
    }
    builder.build()
}

const CLASSIC_CONTINENTS: [(&str, u32, &[&str]); 6] = [
    (
        "North America",
        5,
        &[
            "Alaska",
            "Alberta",
            "Central America",
            "Eastern United States",
            "Greenland",
            "Northwest Territory",
            "Ontario",
            "Quebec",
            "Western United States",
        ],
    ),
    (
        "Europe",
        5,
        &[
            "Great Britain",
            "Iceland",
            "Northern Europe",
            "Scandinavia",
            "Southern Europe",
            "Ukraine",
            "Western Europe",
        ],
    ),
    (
        "Asia",
        7,
        &[
            "Afghanistan",
            "China",
            "India",
            "Irkutsk",
            "Japan",
            "Kamchatka",
            "Middle East",
            "Mongolia",
            "Siam",
            "Siberia",
            "Ural",
            "Yakutsk",
        ],
    ),
    (
        "South America",
        2,
        &["Argentina", "Brazil", "Venezuela", "Peru"],
    ),
    (
        "Africa",
        3,
        &[
            "Congo",
            "East Africa",
            "Egypt",
            "Madagascar",
            "North Africa",
            "South Africa",
        ],
    ),
    (
        "Oceania",
        2,
        &[
            "Eastern Australia",
            "New Guinea",
            "Indonesia",
            "Western Australia",
        ],
    ),
];

macro_rules! borders {
    ($($origin:literal => [$($dest:literal),* $(,)?],)*) => {
        &[$($(($origin, $dest),)*)*]
    };
}

const CLASSIC_BORDERS: &[(&str, &str)] = borders! {
    "Alaska" => ["Alberta", "Northwest Territory", "Kamchatka"],
    "Alberta" => ["Ontario", "Northwest Territory", "Western United States"],
    "Central America" => ["Eastern United States", "Western United States", "Venezuela"],
    "Eastern United States" => ["Quebec", "Ontario", "Western United States"],
    "Greenland" => ["Northwest Territory", "Ontario", "Quebec", "Iceland"],
    "Northwest Territory" => ["Ontario"],
    "Ontario" => ["Quebec", "Western United States"],
    "Great Britain" => ["Northern Europe", "Scandinavia", "Iceland", "Western Europe"],
    "Iceland" => ["Scandinavia"],
    "Northern Europe" => ["Ukraine", "Scandinavia", "Western Europe", "Southern Europe"],
    "Scandinavia" => ["Ukraine"],
    "Southern Europe" => ["Middle East", "Ukraine", "Western Europe", "North Africa", "Egypt"],
    "Ukraine" => ["Afghanistan", "Ural", "Middle East"],
    "Western Europe" => ["North Africa"],
    "Afghanistan" => ["China", "Ural", "Middle East", "India"],
    "China" => ["Mongolia", "Siberia", "Ural", "India", "Siam"],
    "India" => ["Siam", "Middle East"],
    "Irkutsk" => ["Kamchatka", "Yakutsk", "Siberia", "Mongolia"],
    "Japan" => ["Kamchatka", "Mongolia"],
    "Kamchatka" => ["Yakutsk", "Mongolia"],
    "Middle East" => ["Egypt", "East Africa"],
    "Mongolia" => ["Siberia"],
    "Siam" => ["Indonesia"],
    "Siberia" => ["Yakutsk", "Ural"],
    "Argentina" => ["Brazil", "Peru"],
    "Brazil" => ["North Africa", "Venezuela", "Peru"],
    "Venezuela" => ["Peru"],
    "Congo" => ["East Africa", "North Africa", "South Africa"],
    "East Africa" => ["Egypt", "North Africa", "South Africa", "Madagascar"],
    "Egypt" => ["North Africa"],
    "Madagascar" => ["South Africa"],
    "Eastern Australia" => ["New Guinea", "Western Australia"],
    "New Guinea" => ["Indonesia", "Western Australia"],
    "Indonesia" => ["Western Australia"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pair_map() -> (TerritoryGraph, TerritoryId, TerritoryId) {
        let mut builder = TerritoryGraph::builder();
        let north = builder.continent("North", 2).unwrap();
        let a = builder.territory(north, "A").unwrap();
        let b = builder.territory(north, "B").unwrap();
        builder.connect(a, b).unwrap();
        (builder.build().unwrap(), a, b)
    }

    #[test]
    fn test_classic_board_shape() {
        let map = classic().unwrap();
        assert_eq!(map.len(), 42);
        assert_eq!(map.continents().count(), 6);

        let sizes: Vec<usize> = map.continents().map(|(_, c)| c.territories().len()).collect();
        assert_eq!(sizes, [9, 7, 12, 4, 6, 4]);
    }

    #[test]
    fn test_classic_borders_are_symmetric() {
        let map = classic().unwrap();
        for (id, territory) in map.territories() {
            assert!(!territory.adjacent().is_empty(), "{} is isolated", territory.name());
            for &other in territory.adjacent() {
                assert!(map.are_adjacent(other, id));
                assert_ne!(other, id);
            }
        }

        let alaska = map.find_territory("alaska").unwrap();
        let kamchatka = map.find_territory("KAMCHATKA").unwrap();
        assert!(map.are_adjacent(alaska, kamchatka));
    }

    #[test]
    fn test_classic_bonuses() {
        assert_eq!(classic_continent_bonus("Oceania"), Some(2));
        assert_eq!(classic_continent_bonus("south america"), Some(2));
        assert_eq!(classic_continent_bonus("Africa"), Some(3));
        assert_eq!(classic_continent_bonus("North America"), Some(5));
        assert_eq!(classic_continent_bonus("Europe"), Some(5));
        assert_eq!(classic_continent_bonus("Asia"), Some(7));
        assert_eq!(classic_continent_bonus("Atlantis"), None);
    }

    #[test]
    fn test_builder_rejects_bad_maps() {
        assert_eq!(
            TerritoryGraph::builder().build().unwrap_err(),
            MapError::NoContinents
        );

        let mut builder = TerritoryGraph::builder();
        builder.continent("Empty", 1).unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            MapError::EmptyContinent("Empty".to_owned())
        );

        let mut builder = TerritoryGraph::builder();
        let c = builder.continent("C", 1).unwrap();
        assert!(builder.continent("c", 3).is_err());
        let a = builder.territory(c, "A").unwrap();
        assert!(builder.territory(c, "a").is_err());
        assert_eq!(
            builder.connect(a, a).unwrap_err(),
            MapError::SelfAdjacent("A".to_owned())
        );
        assert_eq!(
            builder.connect_names("A", "Z").unwrap_err(),
            MapError::UnknownTerritory("Z".to_owned())
        );
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut builder = TerritoryGraph::builder();
        let c = builder.continent("C", 1).unwrap();
        let a = builder.territory(c, "A").unwrap();
        let b = builder.territory(c, "B").unwrap();
        builder.connect(a, b).unwrap();
        builder.connect(b, a).unwrap();
        builder.connect_names("a", "b").unwrap();
        let map = builder.build().unwrap();

        assert_eq!(map.adjacent_to(a), [b]);
        assert_eq!(map.adjacent_to(b), [a]);
    }

    #[test]
    fn test_ownership_queries() {
        let (mut map, a, b) = pair_map();
        let north = map.find_continent("north").unwrap();

        map.set_occupier(a, Some(PlayerId::P0));
        assert!(!map.owns_all_of(PlayerId::P0, north));
        assert_eq!(map.territories_owned_by(PlayerId::P0), [a]);

        map.set_occupier(b, Some(PlayerId::P0));
        assert!(map.owns_all_of(PlayerId::P0, north));
        assert_eq!(map.continents_owned_by(PlayerId::P0), [north]);
        assert!(map.continents_owned_by(PlayerId::P1).is_empty());

        map.set_occupier(a, Some(PlayerId::P1));
        assert!(!map.owns_all_of(PlayerId::P0, north));
        assert!(!map.owns_all_of(PlayerId::P1, north));
        assert!(map.continents_owned_by(PlayerId::P0).is_empty());
    }

    #[test]
    fn test_check_references() {
        let (map, _, _) = pair_map();
        assert_eq!(map.check_references(), Ok(()));
        assert_eq!(classic().unwrap().check_references(), Ok(()));

        let mut broken = map.clone();
        broken.territories[0].adjacent.push(TerritoryId(9));
        assert_eq!(
            broken.check_references(),
            Err(MapError::UnknownTerritory("#9".to_owned()))
        );

        let mut broken = map.clone();
        broken.territories[1].continent = ContinentId(3);
        assert_eq!(
            broken.check_references(),
            Err(MapError::UnknownContinent("B".to_owned()))
        );

        let mut broken = map;
        broken.continents[0].territories.clear();
        assert_eq!(
            broken.check_references(),
            Err(MapError::EmptyContinent("North".to_owned()))
        );
    }

    #[test]
    fn test_removing_too_many_troops_is_a_no_op() {
        let (mut map, a, _) = pair_map();
        map.add_troops(a, 3);
        assert!(!map.remove_troops(a, 4));
        assert_eq!(map.territory(a).troops(), 3);
        assert!(map.remove_troops(a, 3));
        assert_eq!(map.territory(a).troops(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_troop_changes_never_underflow(ops in prop::collection::vec((any::<bool>(), 0u32..10), 0..50)) {
            let (mut map, a, _) = pair_map();
            let mut expected = 0u32;
            for (add, amount) in ops {
                if add {
                    map.add_troops(a, amount);
                    expected += amount;
                } else if map.remove_troops(a, amount) {
                    expected -= amount;
                } else {
                    prop_assert!(amount > expected);
                }
                prop_assert_eq!(map.territory(a).troops(), expected);
            }
        }

        #[test]
        fn prop_random_borders_stay_symmetric(edges in prop::collection::vec((0u16..6, 0u16..6), 0..30)) {
            let mut builder = TerritoryGraph::builder();
            let c = builder.continent("C", 1).unwrap();
            let ids: Vec<_> = (0..6).map(|i| builder.territory(c, &format!("T{i}")).unwrap()).collect();
            for (a, b) in edges {
                let result = builder.connect(ids[a as usize], ids[b as usize]);
                prop_assert_eq!(result.is_err(), a == b);
            }
            let map = builder.build().unwrap();
            for (id, territory) in map.territories() {
                let mut seen = territory.adjacent().to_vec();
                seen.sort();
                seen.dedup();
                prop_assert_eq!(seen.len(), territory.adjacent().len());
                for &other in territory.adjacent() {
                    prop_assert!(map.are_adjacent(other, id));
                }
            }
        }
    }
}
