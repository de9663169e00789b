use risiko_shared::{
    map::TerritoryGraph,
    objective::{Objective, ObjectiveCard},
    player::PlayerId,
};

/// Whether `player` currently satisfies the objective on their card. Cards
/// that do not name a known objective never win.
pub fn has_won(map: &TerritoryGraph, player: PlayerId, card: &ObjectiveCard) -> bool {
    match card.objective() {
        Ok(objective) => satisfies(map, player, objective),
        Err(err) => {
            tracing::warn!(?player, %err, "objective cannot be evaluated");
            false
        }
    }
}

pub fn satisfies(map: &TerritoryGraph, player: PlayerId, objective: Objective) -> bool {
    match objective {
        Objective::Continents(names) => names.iter().all(|name| owns(map, player, name)),
        Objective::ContinentsAndAnother(names) => {
            names.iter().all(|name| owns(map, player, name))
                && map.continents().any(|(id, continent)| {
                    !names
                        .iter()
                        .any(|name| continent.name().eq_ignore_ascii_case(name))
                        && map.owns_all_of(player, id)
                })
        }
        Objective::Territories { count, garrison } => {
            let held = map
                .territories_owned_by(player)
                .into_iter()
                .filter(|&t| garrison.map_or(true, |min| map.territory(t).troops() >= min))
                .count();
            held >= count
        }
    }
}

fn owns(map: &TerritoryGraph, player: PlayerId, continent: &str) -> bool {
    match map.find_continent(continent) {
        Some(id) => map.owns_all_of(player, id),
        None => {
            tracing::warn!(continent, "objective names a continent missing from the map");
            false
        }
    }
}
