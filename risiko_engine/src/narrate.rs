use risiko_shared::{
    map::TerritoryId,
    player::PlayerId,
    record::{Move, Record},
    Card,
};

use crate::{capability::Capabilities, state::GameSession};

/// Renders a record as a line of the game log. Records that only mark a
/// decision already described by the record that follows return `None`.
pub fn describe(session: &GameSession, record: &Record) -> Option<String> {
    let name = |player: PlayerId| session.player(player).name.to_uppercase();
    let territory = |id: TerritoryId| session.map().territory(id).name().to_owned();

    let line = match record {
        Record::StartGame(r) => {
            let order: Vec<String> = r.turn_order.iter().map(|&p| name(p)).collect();
            format!("GAME STARTED. Turn order: {}", order.join(", "))
        }
        Record::StartTurn(r) => format!(
            "Turn of {}: receives {} armies for {} territories and {} continents",
            name(r.player),
            r.total(),
            r.territories_held,
            r.continents_held.len()
        ),
        Record::RedeemedCards(r) => format!(
            "{} redeemed {} for {} armies ({} from owned territories)",
            name(r.player),
            r.set,
            r.total(),
            r.territory_bonus
        ),
        Record::Attack(r) => {
            let mut line = format!(
                "{} attacked {} ({}) from {} with {} dice: rolled {:?} against {:?}, attacker lost {}, defender lost {}",
                name(r.attacker),
                territory(r.mov.defending_territory),
                name(r.defender),
                territory(r.mov.attacking_territory),
                r.mov.attacking_dice,
                r.attacker_rolls,
                r.defender_rolls,
                r.attacking_lost,
                r.defending_lost,
            );
            if r.territory_conquered {
                line.push_str(&format!(
                    "\n{} conquered {}",
                    name(r.attacker),
                    territory(r.mov.defending_territory)
                ));
            }
            line
        }
        Record::DrewCard(r) => format!(
            "{} drew a bonus card: {}",
            name(r.player),
            describe_card(session, r.card)
        ),
        Record::DeckEmpty(player) => {
            format!("{} earned a bonus card but the deck is empty", name(*player))
        }
        Record::PlayerEliminated(player) => format!("{} has been eliminated", name(*player)),
        Record::Saved(save) => format!("Game saved as {save}"),
        Record::Winner(player) => format!(
            "{} WINS by completing the objective: {}",
            name(*player),
            session.player(*player).objective
        ),
        Record::Move(player, mov) => match mov {
            Move::PlaceInitialTroop(t) | Move::DistributeTroop(t) => {
                format!("{} placed 1 army on {}", name(*player), territory(*t))
            }
            Move::MoveTroopsAfterAttack(r) => format!(
                "{} moved {} armies from {} into {}",
                name(*player),
                r.troop_count,
                territory(r.source_territory),
                territory(r.target_territory)
            ),
            Move::Fortify(r) => format!(
                "{} moved {} armies from {} to {}",
                name(*player),
                r.troop_count,
                territory(r.source_territory),
                territory(r.target_territory)
            ),
            Move::EndTurn => format!("Turn of {} ended", name(*player)),
            Move::RedeemCards(_) | Move::Attack(_) => return None,
        },
    };

    Some(line)
}

pub fn describe_card(session: &GameSession, card: Card) -> String {
    match card.territory() {
        Some(t) => format!("{} ({})", card.symbol(), session.map().territory(t).name()),
        None => card.symbol().to_string(),
    }
}

/// Writes every pending record to the game log.
pub fn flush_journal(session: &mut GameSession, caps: &mut Capabilities) {
    for record in session.drain_journal() {
        if let Some(line) = describe(session, &record) {
            caps.journal(&line);
        }
    }
}
