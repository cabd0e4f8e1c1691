use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Player status in the context of the room and the running hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Dealt in and still able to bet.
    Active,
    /// Folded; out of every pot of this hand.
    Folded,
    /// Whole stack committed; stays in the hand without acting.
    AllIn,
    /// Seated but not dealt in (by request, or waiting for the next hand).
    SittingOut,
    /// Connection lost; not dealt in until reconnected.
    Disconnected,
}

/// A seated player.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stack: Chips,
    /// Private hole cards: 0 or 2.
    pub hole_cards: Vec<Card>,
    /// Chips put in on the current street.
    pub street_bet: Chips,
    /// Chips put in over the whole hand (blinds included).
    pub contribution: Chips,
    pub status: PlayerStatus,

    /// Do not deal this player in from the next hand on.
    pub sit_out_next: bool,
    pub connected: bool,
    /// Asked to leave during a hand; removed when it ends.
    pub leaving: bool,
    /// Forced check/fold actions in a row.
    pub consecutive_timeouts: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole_cards: Vec::new(),
            street_bet: Chips::ZERO,
            contribution: Chips::ZERO,
            status: PlayerStatus::SittingOut,
            sit_out_next: false,
            connected: true,
            leaving: false,
            consecutive_timeouts: 0,
        }
    }

    /// Holds cards in the current hand (may still win a pot).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Can still put chips in on this hand.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active && !self.stack.is_zero()
    }

    /// Eligible to be dealt into the next hand.
    pub fn wants_next_hand(&self) -> bool {
        !self.stack.is_zero() && self.connected && !self.sit_out_next && !self.leaving
    }

    /// Status to show while no hand involves this player.
    pub fn idle_status(&self) -> PlayerStatus {
        if !self.connected {
            PlayerStatus::Disconnected
        } else {
            PlayerStatus::SittingOut
        }
    }

    /// Clears per-hand fields before dealing.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.street_bet = Chips::ZERO;
        self.contribution = Chips::ZERO;
    }

    /// Moves up to `amount` from the stack into the current street.
    /// Returns what was actually paid; an emptied stack makes the player all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = if self.stack < amount { self.stack } else { amount };
        self.stack -= paid;
        self.street_bet += paid;
        self.contribution += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }
}
