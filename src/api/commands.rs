use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::SessionConfig;
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::{EngineError, IllegalReason, PlayerActionKind, SessionManager};

use super::dto::PublicState;
use super::errors::ApiError;
use super::events::HandCompleted;

/// Top-level command from the transport layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    CreateSession(CreateSessionCommand),
    Session {
        session_id: SessionId,
        command: SessionCommand,
    },
}

/// Room creation. Only the player count is required; blinds default to 10/20.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSessionCommand {
    pub player_count: u8,
    #[serde(default = "default_small_blind")]
    pub small_blind: u64,
    #[serde(default = "default_big_blind")]
    pub big_blind: u64,
    /// Overrides the rest of the configuration when present.
    #[serde(default)]
    pub config: Option<SessionConfig>,
}

fn default_small_blind() -> u64 {
    10
}

fn default_big_blind() -> u64 {
    20
}

/// Commands addressed to an existing room.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SessionCommand {
    Join { name: String },
    Leave { player_id: PlayerId },
    SitOut { player_id: PlayerId },
    SitIn { player_id: PlayerId },
    Disconnect { player_id: PlayerId },
    Reconnect { player_id: PlayerId },
    StartHand,
    Action(PlayerActionCommand),
    Close,
}

/// Action names as they arrive from a client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// A player's action; `amount` is the raise-to total and is only read for `Raise`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerActionCommand {
    pub player_id: PlayerId,
    pub action: ActionType,
    #[serde(default)]
    pub amount: Option<u64>,
}

impl PlayerActionCommand {
    pub fn to_kind(&self) -> Result<PlayerActionKind, EngineError> {
        Ok(match self.action {
            ActionType::Fold => PlayerActionKind::Fold,
            ActionType::Check => PlayerActionKind::Check,
            ActionType::Call => PlayerActionKind::Call,
            ActionType::AllIn => PlayerActionKind::AllIn,
            ActionType::Raise => {
                let amount = self.amount.ok_or(IllegalReason::MissingAmount)?;
                PlayerActionKind::Raise(Chips(amount))
            }
        })
    }
}

/// Result of a command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CommandResponse {
    SessionCreated { session_id: SessionId },
    Joined { player_id: PlayerId, seat: SeatIndex },
    State(PublicState),
    Closed { undelivered: Vec<HandCompleted> },
}

/// Runs `command` against `manager`.
pub fn execute(manager: &mut SessionManager, command: Command) -> Result<CommandResponse, ApiError> {
    match command {
        Command::CreateSession(cmd) => {
            let config = match cmd.config {
                Some(config) => config,
                None => SessionConfig::new(cmd.player_count).with_blinds(cmd.small_blind, cmd.big_blind),
            };
            let session_id = manager.create_session_with(config)?;
            Ok(CommandResponse::SessionCreated { session_id })
        }
        Command::Session { session_id, command } => execute_in_session(manager, session_id, command),
    }
}

fn execute_in_session(
    manager: &mut SessionManager,
    session_id: SessionId,
    command: SessionCommand,
) -> Result<CommandResponse, ApiError> {
    if let SessionCommand::Close = command {
        let undelivered = manager.close_session(session_id)?;
        return Ok(CommandResponse::Closed { undelivered });
    }

    let session = manager.session_mut(session_id)?;
    match command {
        SessionCommand::Join { name } => {
            let (player_id, seat) = session.join(&name)?;
            return Ok(CommandResponse::Joined { player_id, seat });
        }
        SessionCommand::Leave { player_id } => session.leave(player_id)?,
        SessionCommand::SitOut { player_id } => session.sit_out(player_id)?,
        SessionCommand::SitIn { player_id } => session.sit_in(player_id)?,
        SessionCommand::Disconnect { player_id } => session.disconnect(player_id)?,
        SessionCommand::Reconnect { player_id } => session.reconnect(player_id)?,
        SessionCommand::StartHand => session.start_hand()?,
        SessionCommand::Action(cmd) => {
            let kind = cmd.to_kind()?;
            return Ok(CommandResponse::State(session.submit_action(cmd.player_id, kind)?));
        }
        SessionCommand::Close => {}
    }
    Ok(CommandResponse::State(session.public_state()))
}
