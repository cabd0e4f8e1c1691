use crate::domain::{Chips, DeckExhausted, PlayerId, SessionId};
use crate::eval::EvalError;

use thiserror::Error;

/// Why an action was rejected. The `Display` text is the reason shown to the player.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IllegalReason {
    #[error("player is not active in this hand")]
    NotActive,

    #[error("cannot check facing a bet, {to_call} to call")]
    CannotCheck { to_call: Chips },

    #[error("nothing to call, check instead")]
    NothingToCall,

    #[error("raise needs an amount")]
    MissingAmount,

    #[error("minimum raise is to {min_to}")]
    RaiseTooSmall { min_to: Chips },

    #[error("raise to {requested} exceeds the stack, the most is {max_to} (use all-in)")]
    RaiseExceedsStack { requested: Chips, max_to: Chips },

    #[error("not enough chips to raise, call or go all-in")]
    NoChipsToRaise,

    #[error("betting was not reopened, only call or fold")]
    RaiseNotAllowed,

    #[error("no chips left to go all-in")]
    EmptyStack,
}

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("illegal action: {0}")]
    IllegalAction(IllegalReason),

    #[error("not the turn of player {0}")]
    NotYourTurn(PlayerId),

    #[error("no hand in progress")]
    HandNotInProgress,

    #[error("a hand is already in progress")]
    HandAlreadyInProgress,

    #[error("deck exhausted: requested {requested}, {remaining} left")]
    DeckExhausted { requested: usize, remaining: usize },

    #[error("room is full")]
    RoomFull,

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("player {0} not found in this session")]
    PlayerNotFound(PlayerId),

    #[error("name {0:?} is already taken")]
    NameTaken(String),

    #[error("invalid player name {0:?}")]
    InvalidName(String),

    #[error("not enough players to deal a hand")]
    NotEnoughPlayers,

    #[error("session is closed")]
    SessionClosed,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("hand evaluation failed: {0}")]
    Eval(#[from] EvalError),

    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Caller errors that leave the state untouched. The rest are invariant
    /// violations and point at a bug.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EngineError::DeckExhausted { .. } | EngineError::Eval(_) | EngineError::Internal(_)
        )
    }
}

impl From<IllegalReason> for EngineError {
    fn from(reason: IllegalReason) -> Self {
        EngineError::IllegalAction(reason)
    }
}

impl From<DeckExhausted> for EngineError {
    fn from(e: DeckExhausted) -> Self {
        EngineError::DeckExhausted {
            requested: e.requested,
            remaining: e.remaining,
        }
    }
}
