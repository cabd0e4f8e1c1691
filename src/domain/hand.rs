use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;
use crate::domain::{HandId, PlayerId, SessionId};

/// Street of a hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// The street that follows, and how many board cards it reveals.
    pub fn next(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            Street::River | Street::Showdown => None,
        }
    }
}

/// Packed hand strength; the eval module fills it and adds accessors.
/// Ordering of the inner value is the total order of hands.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Why a hand ended.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEndReason {
    /// Everyone else folded; no cards are shown.
    AllFoldedButOne,
    /// Betting finished on the river.
    Showdown,
    /// Fewer than two players could still bet; the board was run out.
    ShowdownForced,
}

/// A hand shown down.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealedHand {
    pub hole_cards: Vec<Card>,
    pub best_five: Vec<Card>,
    pub rank: HandRank,
}

/// One settled pot slice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotResult {
    pub amount: Chips,
    pub eligible: Vec<PlayerId>,
    /// Winners with what each received, odd chips included.
    pub awards: Vec<(PlayerId, Chips)>,
}

/// Per-player outcome of a hand.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub contributed: Chips,
    pub won: Chips,
    /// `won - contributed`.
    pub net_chips: i64,
    pub revealed: Option<RevealedHand>,
    pub is_winner: bool,
}

/// Short record of a finished hand.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub session_id: SessionId,
    pub hand_id: HandId,
    pub reason: HandEndReason,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub pots: Vec<PotResult>,
    pub results: Vec<PlayerHandResult>,
}

impl HandSummary {
    pub fn winners(&self) -> Vec<PlayerId> {
        self.results
            .iter()
            .filter(|r| r.is_winner)
            .map(|r| r.player_id)
            .collect()
    }

    pub fn net_for(&self, player_id: PlayerId) -> Option<i64> {
        self.results
            .iter()
            .find(|r| r.player_id == player_id)
            .map(|r| r.net_chips)
    }
}
