use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandEndReason, HandSummary};
use crate::domain::{HandId, PlayerId, SessionId};
use crate::eval::HandCategory;

/// One settled pot as reported to the outside.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotBreakdown {
    pub amount: Chips,
    pub eligible: Vec<PlayerId>,
    pub winners: Vec<PlayerId>,
    pub awards: Vec<(PlayerId, Chips)>,
}

/// Cards shown at showdown.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShownHand {
    pub player_id: PlayerId,
    pub hole_cards: Vec<Card>,
    pub best_five: Vec<Card>,
    pub category: HandCategory,
}

/// Net chip change of one participant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChipDelta {
    pub player_id: PlayerId,
    pub delta: i64,
}

/// Emitted once per finished hand, for statistics and hand-history consumers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandCompleted {
    pub session_id: SessionId,
    pub hand_number: HandId,
    pub reason: HandEndReason,
    pub pot: Chips,
    pub board: Vec<Card>,
    pub pots: Vec<PotBreakdown>,
    pub shown: Vec<ShownHand>,
    pub winners: Vec<PlayerId>,
    /// Sums to zero.
    pub deltas: Vec<ChipDelta>,
    /// Players who left the table with no chips after this hand.
    pub eliminated: Vec<PlayerId>,
}

impl HandCompleted {
    pub fn from_summary(summary: &HandSummary, eliminated: Vec<PlayerId>) -> Self {
        let pots = summary
            .pots
            .iter()
            .map(|p| PotBreakdown {
                amount: p.amount,
                eligible: p.eligible.clone(),
                winners: p.awards.iter().map(|(id, _)| *id).collect(),
                awards: p.awards.clone(),
            })
            .collect();

        let shown = summary
            .results
            .iter()
            .filter_map(|r| {
                r.revealed.as_ref().map(|h| ShownHand {
                    player_id: r.player_id,
                    hole_cards: h.hole_cards.clone(),
                    best_five: h.best_five.clone(),
                    category: h.rank.category(),
                })
            })
            .collect();

        let deltas = summary
            .results
            .iter()
            .map(|r| ChipDelta {
                player_id: r.player_id,
                delta: r.net_chips,
            })
            .collect();

        Self {
            session_id: summary.session_id,
            hand_number: summary.hand_id,
            reason: summary.reason,
            pot: summary.total_pot,
            board: summary.board.clone(),
            pots,
            shown,
            winners: summary.winners(),
            deltas,
            eliminated,
        }
    }

    pub fn delta_for(&self, player_id: PlayerId) -> Option<i64> {
        self.deltas
            .iter()
            .find(|d| d.player_id == player_id)
            .map(|d| d.delta)
    }
}
