use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandEndReason, Street};
use crate::domain::{HandId, PlayerId, SeatIndex, SessionId};
use crate::engine::actions::PlayerActionKind;

/// Kind of event in a hand.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    HandStarted {
        session_id: SessionId,
        hand_id: HandId,
        dealer: SeatIndex,
    },

    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Private: only the log carries the cards.
    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    CardBurned,

    /// New community cards; `cards` is the full board after the deal.
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },

    PlayerActed {
        player_id: PlayerId,
        seat: SeatIndex,
        action: PlayerActionKind,
        /// Applied by the engine on a timeout or a leave.
        forced: bool,
        new_stack: Chips,
        pot_after: Chips,
    },

    StreetChanged {
        street: Street,
    },

    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        rank_value: u32,
    },

    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    HandFinished {
        hand_id: HandId,
        reason: HandEndReason,
    },

    /// The session was closed mid-hand and contributions were returned.
    HandAbandoned {
        hand_id: HandId,
    },
}

/// An event with its sequence number.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Complete log of one hand.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    /// Actions in the order they were taken.
    pub fn actions(&self) -> impl Iterator<Item = (PlayerId, PlayerActionKind)> + '_ {
        self.events.iter().filter_map(|e| match &e.kind {
            HandEventKind::PlayerActed {
                player_id, action, ..
            } => Some((*player_id, *action)),
            _ => None,
        })
    }
}
