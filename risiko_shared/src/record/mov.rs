use crate::map::TerritoryId;

/// A decision taken by the player whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Move {
    PlaceInitialTroop(TerritoryId),
    DistributeTroop(TerritoryId),
    RedeemCards(MoveRedeemCards),
    Attack(MoveAttack),
    MoveTroopsAfterAttack(MoveTroopsAfterAttack),
    Fortify(MoveFortify),
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAttack {
    pub attacking_territory: TerritoryId,
    pub defending_territory: TerritoryId,
    pub attacking_dice: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRedeemCards {
    /// Zero-based positions in the player's hand.
    pub hand_indices: [usize; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveTroopsAfterAttack {
    pub source_territory: TerritoryId,
    pub target_territory: TerritoryId,
    pub troop_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveFortify {
    pub source_territory: TerritoryId,
    pub target_territory: TerritoryId,
    pub troop_count: u32,
}
