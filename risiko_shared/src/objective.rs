//! Secret objectives.
//!
//! Players hold an [`ObjectiveCard`], which is just the text printed on the
//! card. Victory checks parse that text back into an [`Objective`], so a save
//! written with an unknown objective still loads and simply never wins.

use std::{fmt, str::FromStr};

use crate::error::UnknownObjective;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Objective {
    /// Own every territory of both continents.
    Continents([&'static str; 2]),
    /// Own both continents plus any one other continent.
    ContinentsAndAnother([&'static str; 2]),
    /// Own at least `count` territories, each holding at least `garrison`
    /// armies when set.
    Territories { count: usize, garrison: Option<u32> },
}

pub const CATALOGUE: [Objective; 8] = [
    Objective::Continents(["North America", "Africa"]),
    Objective::Continents(["North America", "Oceania"]),
    Objective::Continents(["Asia", "South America"]),
    Objective::Continents(["Asia", "Africa"]),
    Objective::Territories {
        count: 18,
        garrison: Some(2),
    },
    Objective::Territories {
        count: 24,
        garrison: None,
    },
    Objective::ContinentsAndAnother(["Europe", "South America"]),
    Objective::ContinentsAndAnother(["Europe", "Oceania"]),
];

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continents([a, b]) => write!(f, "Conquer the entirety of {a} and {b}"),
            Self::ContinentsAndAnother([a, b]) => write!(
                f,
                "Conquer the entirety of {a} and {b} plus a third continent of your choice"
            ),
            Self::Territories {
                count,
                garrison: None,
            } => write!(f, "Conquer {count} territories"),
            Self::Territories {
                count,
                garrison: Some(garrison),
            } => write!(
                f,
                "Conquer {count} territories and hold each with at least {garrison} armies"
            ),
        }
    }
}

impl FromStr for Objective {
    type Err = UnknownObjective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        CATALOGUE
            .into_iter()
            .find(|objective| objective.to_string().eq_ignore_ascii_case(text))
            .ok_or_else(|| UnknownObjective(text.to_owned()))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ObjectiveCard(String);

impl ObjectiveCard {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn objective(&self) -> Result<Objective, UnknownObjective> {
        self.0.parse()
    }
}

impl From<Objective> for ObjectiveCard {
    fn from(objective: Objective) -> Self {
        Self(objective.to_string())
    }
}

impl fmt::Display for ObjectiveCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_texts_parse_back() {
        for objective in CATALOGUE {
            let card = ObjectiveCard::from(objective);
            assert_eq!(card.objective(), Ok(objective));
        }
    }

    #[test]
    fn test_catalogue_texts_are_distinct() {
        let mut texts: Vec<String> = CATALOGUE.iter().map(ToString::to_string).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), CATALOGUE.len());
    }

    #[test]
    fn test_parsing_ignores_case_and_padding() {
        assert_eq!(
            "  conquer 24 TERRITORIES ".parse::<Objective>(),
            Ok(Objective::Territories {
                count: 24,
                garrison: None
            })
        );
    }

    #[test]
    fn test_unknown_objective() {
        let card = ObjectiveCard::new("Conquer the moon");
        assert_eq!(
            card.objective(),
            Err(UnknownObjective("Conquer the moon".to_owned()))
        );
    }
}
