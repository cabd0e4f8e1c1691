use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Error as returned to a client: a stable machine code plus a readable message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Stable code for each engine error.
pub fn error_code(err: &EngineError) -> &'static str {
    match err {
        EngineError::IllegalAction(_) => "illegal_action",
        EngineError::NotYourTurn(_) => "not_your_turn",
        EngineError::HandNotInProgress => "hand_not_in_progress",
        EngineError::HandAlreadyInProgress => "hand_in_progress",
        EngineError::DeckExhausted { .. } => "deck_exhausted",
        EngineError::RoomFull => "room_full",
        EngineError::SessionNotFound(_) => "session_not_found",
        EngineError::PlayerNotFound(_) => "player_not_found",
        EngineError::NameTaken(_) => "name_taken",
        EngineError::InvalidName(_) => "invalid_name",
        EngineError::NotEnoughPlayers => "not_enough_players",
        EngineError::SessionClosed => "session_closed",
        EngineError::InvalidConfig(_) => "invalid_config",
        EngineError::Eval(_) => "invalid_cards",
        EngineError::Internal(_) => "internal",
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::new(error_code(&err), err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
