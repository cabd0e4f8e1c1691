//! Messages a room actor accepts.

use tokio::sync::oneshot;

use crate::api::dto::{PlayerView, PublicState};
use crate::api::events::HandCompleted;
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::{ActionChoice, EngineError, PlayerActionKind};

pub type Reply<T> = oneshot::Sender<Result<T, EngineError>>;

#[derive(Debug)]
pub enum RoomMessage {
    Join {
        name: String,
        response: Reply<(PlayerId, SeatIndex)>,
    },

    Leave {
        player_id: PlayerId,
        response: Reply<()>,
    },

    SitOut {
        player_id: PlayerId,
        response: Reply<()>,
    },

    SitIn {
        player_id: PlayerId,
        response: Reply<()>,
    },

    Disconnect {
        player_id: PlayerId,
        response: Reply<()>,
    },

    Reconnect {
        player_id: PlayerId,
        response: Reply<()>,
    },

    StartHand {
        response: Reply<()>,
    },

    /// Player action (fold, check, call, raise, all-in)
    TakeAction {
        player_id: PlayerId,
        kind: PlayerActionKind,
        response: Reply<PublicState>,
    },

    GetPublicState {
        response: oneshot::Sender<PublicState>,
    },

    GetPlayerView {
        player_id: PlayerId,
        response: Reply<PlayerView>,
    },

    GetLegalActions {
        player_id: PlayerId,
        response: oneshot::Sender<Vec<ActionChoice>>,
    },

    /// Close the room; the reply carries events not yet forwarded.
    Close {
        response: oneshot::Sender<Vec<HandCompleted>>,
    },
}
