use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::Table;
use crate::engine::side_pots::{compute_side_pots, Contribution, SidePot};

/// Chips committed in the running hand. The split into main and side pots is
/// derived from the players' contributions at settlement.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self { total: Chips::ZERO }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Per-seat contributions of everyone who put chips in this hand.
    pub fn contributions(table: &Table) -> Vec<Contribution> {
        table
            .players()
            .filter(|(_, p)| !p.contribution.is_zero())
            .map(|(seat, p)| Contribution {
                seat,
                amount: p.contribution,
                folded: !p.is_in_hand(),
            })
            .collect()
    }

    /// Main pot and side pots as they stand now.
    pub fn side_pots(table: &Table) -> Vec<SidePot> {
        compute_side_pots(&Self::contributions(table))
    }
}
