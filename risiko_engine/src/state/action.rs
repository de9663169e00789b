//! Validated game actions. Each one either commits its records or returns a
//! [`RulesError`] and leaves the session untouched.

use risiko_shared::{
    map::TerritoryId,
    player::PlayerId,
    record::{
        Attack, Move, MoveAttack, MoveFortify, MoveRedeemCards, MoveTroopsAfterAttack, Record,
        RedeemedCards, StartTurn,
    },
    Card,
};

use super::{record, GameSession};
use crate::{error::RulesError, victory, MAX_ATTACK_DICE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusCard {
    Drawn(Card),
    DeckEmpty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attack: Attack,
    /// Set on the first conquest of a turn only.
    pub bonus: Option<BonusCard>,
}

impl GameSession {
    pub fn start_turn(&mut self) -> StartTurn {
        let start = record::start_turn(&self.map, self.current_player());
        self.commit(Record::StartTurn(start.clone()));
        start
    }

    pub fn place_initial_troop(
        &mut self,
        player: PlayerId,
        territory: TerritoryId,
    ) -> Result<(), RulesError> {
        self.ensure_owner(player, territory)?;
        if self.player(player).armies == 0 {
            return Err(RulesError::NoArmiesLeft);
        }

        self.commit(Record::Move(player, Move::PlaceInitialTroop(territory)));
        Ok(())
    }

    pub fn place_troop(&mut self, player: PlayerId, territory: TerritoryId) -> Result<(), RulesError> {
        self.ensure_owner(player, territory)?;
        if self.turn.armies_to_distribute == 0 {
            return Err(RulesError::NoArmiesLeft);
        }

        self.commit(Record::Move(player, Move::DistributeTroop(territory)));
        Ok(())
    }

    pub fn redeem_cards(
        &mut self,
        player: PlayerId,
        hand_indices: [usize; 3],
    ) -> Result<RedeemedCards, RulesError> {
        let redeemed = record::redeemed_cards(self, player, hand_indices)?;

        self.commit(Record::Move(
            player,
            Move::RedeemCards(MoveRedeemCards { hand_indices }),
        ));
        self.commit(Record::RedeemedCards(redeemed.clone()));
        Ok(redeemed)
    }

    /// Checks an attack and returns how many dice the defender rolls.
    pub fn validate_attack(&self, player: PlayerId, mov: MoveAttack) -> Result<u32, RulesError> {
        self.ensure_owner(player, mov.attacking_territory)?;
        if self.map.territory(mov.defending_territory).occupier() == Some(player) {
            return Err(RulesError::OwnTerritory(mov.defending_territory));
        }
        if !self
            .map
            .are_adjacent(mov.attacking_territory, mov.defending_territory)
        {
            return Err(RulesError::NotAdjacent(
                mov.attacking_territory,
                mov.defending_territory,
            ));
        }

        let max = MAX_ATTACK_DICE.min(
            self.map
                .territory(mov.attacking_territory)
                .troops()
                .saturating_sub(1),
        );
        if mov.attacking_dice == 0 || mov.attacking_dice > max {
            return Err(RulesError::DiceCount {
                requested: mov.attacking_dice,
                max,
            });
        }

        let defending_troops = self.map.territory(mov.defending_territory).troops();
        Ok(mov.attacking_dice.min(defending_troops))
    }

    pub fn resolve_attack(
        &mut self,
        player: PlayerId,
        mov: MoveAttack,
    ) -> Result<AttackOutcome, RulesError> {
        let defending_dice = self.validate_attack(player, mov)?;
        let attacker_rolls = record::roll_sorted(&mut self.rng, mov.attacking_dice);
        let defender_rolls = record::roll_sorted(&mut self.rng, defending_dice);
        self.apply_attack(player, mov, attacker_rolls, defender_rolls)
    }

    /// Like [`GameSession::resolve_attack`] with the dice supplied by the
    /// caller, in any order.
    pub fn resolve_attack_with_rolls(
        &mut self,
        player: PlayerId,
        mov: MoveAttack,
        attacker_rolls: Vec<u8>,
        defender_rolls: Vec<u8>,
    ) -> Result<AttackOutcome, RulesError> {
        let defending_dice = self.validate_attack(player, mov)?;
        if attacker_rolls.len() != mov.attacking_dice as usize {
            return Err(RulesError::RollCount {
                expected: mov.attacking_dice as usize,
            });
        }
        if defender_rolls.len() != defending_dice as usize {
            return Err(RulesError::RollCount {
                expected: defending_dice as usize,
            });
        }
        self.apply_attack(player, mov, attacker_rolls, defender_rolls)
    }

    fn apply_attack(
        &mut self,
        player: PlayerId,
        mov: MoveAttack,
        attacker_rolls: Vec<u8>,
        defender_rolls: Vec<u8>,
    ) -> Result<AttackOutcome, RulesError> {
        let attack = record::attack(self, player, mov, attacker_rolls, defender_rolls);

        self.commit(Record::Move(player, Move::Attack(mov)));
        self.commit(Record::Attack(attack.clone()));

        let mut bonus = None;
        if attack.territory_conquered {
            if attack.defender_eliminated {
                self.commit(Record::PlayerEliminated(attack.defender));
            }

            if !self.player(player).received_bonus_card {
                let drew = record::drew_card(self, player);
                bonus = Some(match &drew {
                    Record::DrewCard(r) => BonusCard::Drawn(r.card),
                    _ => BonusCard::DeckEmpty,
                });
                self.commit(drew);
            }
        }

        Ok(AttackOutcome { attack, bonus })
    }

    /// Occupies a freshly conquered territory with `troop_count` armies from
    /// the attacking one.
    pub fn move_after_conquest(
        &mut self,
        player: PlayerId,
        source: TerritoryId,
        target: TerritoryId,
        troop_count: u32,
    ) -> Result<(), RulesError> {
        self.ensure_transfer(player, source, target, troop_count)?;
        self.commit(Record::Move(
            player,
            Move::MoveTroopsAfterAttack(MoveTroopsAfterAttack {
                source_territory: source,
                target_territory: target,
                troop_count,
            }),
        ));
        Ok(())
    }

    pub fn fortify(
        &mut self,
        player: PlayerId,
        source: TerritoryId,
        target: TerritoryId,
        troop_count: u32,
    ) -> Result<(), RulesError> {
        self.ensure_transfer(player, source, target, troop_count)?;
        self.commit(Record::Move(
            player,
            Move::Fortify(MoveFortify {
                source_territory: source,
                target_territory: target,
                troop_count,
            }),
        ));
        Ok(())
    }

    pub fn end_turn(&mut self, player: PlayerId) {
        self.commit(Record::Move(player, Move::EndTurn));
    }

    pub fn record_saved(&mut self, name: &str) {
        self.commit(Record::Saved(name.to_owned()));
    }

    /// Ends the game if `player` now meets their objective.
    pub fn check_victory(&mut self, player: PlayerId) -> bool {
        if !self.in_progress {
            return self.winner == Some(player);
        }
        if !victory::has_won(&self.map, player, &self.player(player).objective) {
            return false;
        }

        self.commit(Record::Winner(player));
        true
    }

    fn ensure_owner(&self, player: PlayerId, territory: TerritoryId) -> Result<(), RulesError> {
        if self.map.territory(territory).occupier() == Some(player) {
            Ok(())
        } else {
            Err(RulesError::NotOwner(territory))
        }
    }

    fn ensure_transfer(
        &self,
        player: PlayerId,
        source: TerritoryId,
        target: TerritoryId,
        troop_count: u32,
    ) -> Result<(), RulesError> {
        self.ensure_owner(player, source)?;
        self.ensure_owner(player, target)?;
        if source == target || !self.map.are_adjacent(source, target) {
            return Err(RulesError::NotAdjacent(source, target));
        }

        let max = self.map.territory(source).troops().saturating_sub(1);
        if troop_count == 0 || troop_count > max {
            return Err(RulesError::TroopCount {
                requested: troop_count,
                min: 1,
                max,
            });
        }
        Ok(())
    }
}
