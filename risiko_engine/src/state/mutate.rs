use risiko_shared::{
    map::TerritoryId,
    player::PlayerId,
    record::{
        Attack, DrewCard, Move, MoveFortify, MoveTroopsAfterAttack, Record, RedeemedCards,
        StartTurn,
    },
};

use super::GameSession;
use crate::turn::TurnSnapshot;

impl GameSession {
    /// Applies a record to the state and appends it to the journal. Records
    /// are validated by whoever builds them.
    pub(crate) fn commit(&mut self, record: Record) {
        tracing::debug!(?record, "commit");
        self.journal.push(record.clone());
        match record {
            Record::StartGame(_) => {}
            Record::StartTurn(r) => self.commit_record_start_turn(r),
            Record::RedeemedCards(r) => self.commit_record_redeemed_cards(r),
            Record::Attack(r) => self.commit_record_attack(r),
            Record::DrewCard(r) => self.commit_record_drew_card(r),
            Record::DeckEmpty(player) => self.commit_record_deck_empty(player),
            Record::PlayerEliminated(_) => {}
            Record::Saved(_) => {}
            Record::Winner(player) => self.commit_record_winner(player),
            Record::Move(player, mov) => match mov {
                Move::PlaceInitialTroop(territory) => {
                    self.commit_move_place_initial_troop(player, territory)
                }
                Move::DistributeTroop(territory) => {
                    self.commit_move_distribute_troop(player, territory)
                }
                Move::RedeemCards(_) | Move::Attack(_) => {}
                Move::MoveTroopsAfterAttack(r) => self.commit_move_troops_after_attack(r),
                Move::Fortify(r) => self.commit_move_fortify(r),
                Move::EndTurn => self.turn.complete = true,
            },
        }
    }

    fn commit_move_place_initial_troop(&mut self, player: PlayerId, territory: TerritoryId) {
        self.map.add_troops(territory, 1);

        let player = &mut self.players[player.index()];
        player.armies = player.armies.saturating_sub(1);
        player.total_armies += 1;
    }

    fn commit_move_distribute_troop(&mut self, player: PlayerId, territory: TerritoryId) {
        self.map.add_troops(territory, 1);
        self.turn.armies_to_distribute = self.turn.armies_to_distribute.saturating_sub(1);
        self.players[player.index()].total_armies += 1;
    }

    fn commit_move_troops_after_attack(&mut self, r: MoveTroopsAfterAttack) {
        self.map.remove_troops(r.source_territory, r.troop_count);
        self.map.set_troops(r.target_territory, r.troop_count);
    }

    fn commit_move_fortify(&mut self, r: MoveFortify) {
        if self.map.remove_troops(r.source_territory, r.troop_count) {
            self.map.add_troops(r.target_territory, r.troop_count);
        }
    }

    fn commit_record_start_turn(&mut self, r: StartTurn) {
        let player = &mut self.players[r.player.index()];
        player.conquered_this_turn = 0;
        player.received_bonus_card = false;

        self.turn.armies_to_distribute = r.total();
        self.turn.snapshot = TurnSnapshot {
            armies_received: r.total(),
            territories: r.territories_held,
            continents: r.continents_held.len() as u32,
        };
    }

    fn commit_record_redeemed_cards(&mut self, r: RedeemedCards) {
        let mut indices = r.hand_indices;
        indices.sort_unstable_by(|a, b| b.cmp(a));

        let hand = &mut self.players[r.player.index()].cards;
        for index in indices {
            hand.remove(index);
        }
        self.deck.return_cards(r.cards, &mut self.rng);

        self.turn.armies_to_distribute += r.total();
        self.turn.snapshot.armies_received += r.total();
    }

    fn commit_record_attack(&mut self, r: Attack) {
        self.map
            .remove_troops(r.mov.attacking_territory, r.attacking_lost);
        self.map
            .remove_troops(r.mov.defending_territory, r.defending_lost);

        if r.territory_conquered {
            self.map
                .set_occupier(r.mov.defending_territory, Some(r.attacker));
            self.players[r.attacker.index()].conquered_this_turn += 1;
        }
    }

    fn commit_record_drew_card(&mut self, r: DrewCard) {
        let player = &mut self.players[r.player.index()];
        player.cards.push(r.card);
        player.received_bonus_card = true;
    }

    fn commit_record_deck_empty(&mut self, player: PlayerId) {
        self.players[player.index()].received_bonus_card = true;
    }

    fn commit_record_winner(&mut self, player: PlayerId) {
        self.in_progress = false;
        self.winner = Some(player);
    }
}
