use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("the map has no continents")]
    NoContinents,
    #[error("continent {0} has no territories")]
    EmptyContinent(String),
    #[error("continent {0} is defined twice")]
    DuplicateContinent(String),
    #[error("territory {0} is defined twice")]
    DuplicateTerritory(String),
    #[error("unknown territory {0}")]
    UnknownTerritory(String),
    #[error("territory {0} belongs to an unknown continent")]
    UnknownContinent(String),
    #[error("territory {0} cannot border itself")]
    SelfAdjacent(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("objective not recognised: {0:?}")]
pub struct UnknownObjective(pub String);
