use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};

/// What a player does on their turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Raise *to* this street total. With no bet yet this opens the betting.
    Raise(Chips),
    /// Commit the whole remaining stack.
    AllIn,
}

/// A player's action.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub player_id: PlayerId,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, kind: PlayerActionKind) -> Self {
        Self { player_id, kind }
    }
}

/// A legal option for the player to act, with the amounts it involves.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionChoice {
    Fold,
    Check,
    /// Chips added by calling (capped at the stack).
    Call(Chips),
    /// Allowed raise-to totals for this street.
    Raise { min_to: Chips, max_to: Chips },
    /// Street total after shoving the rest of the stack.
    AllIn(Chips),
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => f.write_str("fold"),
            PlayerActionKind::Check => f.write_str("check"),
            PlayerActionKind::Call => f.write_str("call"),
            PlayerActionKind::Raise(to) => write!(f, "raise to {to}"),
            PlayerActionKind::AllIn => f.write_str("all-in"),
        }
    }
}
