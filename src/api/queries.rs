use serde::{Deserialize, Serialize};

use crate::domain::table::Table;
use crate::domain::{PlayerId, SessionId};
use crate::engine::{EngineError, HandEngine, SessionManager};

use super::dto::{PlayerView, PublicPlayer, PublicState};
use super::errors::ApiError;

/// Read-only requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    GetPublicState { session_id: SessionId },
    GetPlayerView { session_id: SessionId, player_id: PlayerId },
    ListSessions,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    PublicState(PublicState),
    PlayerView(PlayerView),
    Sessions(Vec<PublicState>),
}

pub fn run_query(manager: &SessionManager, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetPublicState { session_id } => Ok(QueryResponse::PublicState(manager.get_public_state(session_id)?)),
        Query::GetPlayerView { session_id, player_id } => {
            Ok(QueryResponse::PlayerView(manager.player_view(session_id, player_id)?))
        }
        Query::ListSessions => Ok(QueryResponse::Sessions(
            manager.session_ids().into_iter().filter_map(|id| manager.get_public_state(id).ok()).collect(),
        )),
    }
}

/// Public snapshot of `table`. Hole cards never leave through here.
pub fn build_public_state(table: &Table, engine: Option<&HandEngine>, closed: bool) -> PublicState {
    let players = table
        .players()
        .map(|(seat, p)| PublicPlayer {
            player_id: p.id,
            name: p.name.clone(),
            seat,
            stack: p.stack,
            status: p.status,
            street_bet: p.street_bet,
            contribution: p.contribution,
            has_cards: p.is_in_hand() && !p.hole_cards.is_empty(),
            connected: p.connected,
        })
        .collect();

    let to_act = engine
        .and_then(|e| e.current_actor)
        .and_then(|seat| table.player_at(seat))
        .map(|p| p.id);

    PublicState {
        session_id: table.id,
        name: table.name.clone(),
        hand_number: table.hand_number,
        hand_in_progress: table.hand_in_progress,
        street: table.street,
        board: table.board.clone(),
        pot: table.total_pot,
        current_bet: engine.map(|e| e.betting.current_bet).unwrap_or_default(),
        small_blind: table.config.stakes.small_blind,
        big_blind: table.config.stakes.big_blind,
        dealer_button: table.dealer_button,
        to_act,
        players,
        closed,
    }
}

/// Public snapshot plus what only `player_id` may see.
pub fn build_player_view(
    table: &Table,
    engine: Option<&HandEngine>,
    closed: bool,
    player_id: PlayerId,
    time_left_secs: Option<u32>,
) -> Result<PlayerView, EngineError> {
    let seat = table
        .seat_of(player_id)
        .ok_or(EngineError::PlayerNotFound(player_id))?;
    let hole_cards = table
        .player_at(seat)
        .map(|p| p.hole_cards.clone())
        .unwrap_or_default();
    let legal_actions = engine
        .map(|e| e.legal_actions(table, player_id))
        .unwrap_or_default();

    Ok(PlayerView {
        state: build_public_state(table, engine, closed),
        player_id,
        seat,
        hole_cards,
        legal_actions,
        time_left_secs,
    })
}
