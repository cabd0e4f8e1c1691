use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::{HandId, PlayerId, SeatIndex, SessionId};
use crate::engine::ActionChoice;

/// What everyone at the table may see about a player. Never carries hole cards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub seat: SeatIndex,
    pub stack: Chips,
    pub status: PlayerStatus,
    /// Chips in front of the player on this street.
    pub street_bet: Chips,
    /// Chips put in over the whole hand.
    pub contribution: Chips,
    pub has_cards: bool,
    pub connected: bool,
}

/// Public snapshot of a room.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicState {
    pub session_id: SessionId,
    pub name: String,
    /// Number of the running hand, or of the last one between hands.
    pub hand_number: HandId,
    pub hand_in_progress: bool,
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub current_bet: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub dealer_button: Option<SeatIndex>,
    pub to_act: Option<PlayerId>,
    pub players: Vec<PublicPlayer>,
    pub closed: bool,
}

impl PublicState {
    pub fn player(&self, player_id: PlayerId) -> Option<&PublicPlayer> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

/// A room as one player sees it: the public state plus their own cards and options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub state: PublicState,
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub hole_cards: Vec<Card>,
    /// Empty unless it is this player's turn.
    pub legal_actions: Vec<ActionChoice>,
    /// Seconds left on the player's clock while it is their turn.
    pub time_left_secs: Option<u32>,
}
