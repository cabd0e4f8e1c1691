use std::collections::HashMap;

use crate::api::dto::{PlayerView, PublicState};
use crate::api::events::HandCompleted;
use crate::domain::table::SessionConfig;
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::{EngineError, GameSession, PlayerActionKind, RandomSource};
use crate::infra::ids::IdGenerator;

/// Many independent rooms behind one synchronous facade.
///
/// Rooms share no state; the manager only routes calls by `SessionId`.
pub struct SessionManager {
    sessions: HashMap<SessionId, GameSession>,
    ids: IdGenerator,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Opens a room for `player_count` seats with the given blinds.
    pub fn create_session(&mut self, player_count: u8, small_blind: u64, big_blind: u64) -> Result<SessionId, EngineError> {
        let config = SessionConfig::new(player_count).with_blinds(small_blind, big_blind);
        self.create_session_with(config)
    }

    pub fn create_session_with(&mut self, config: SessionConfig) -> Result<SessionId, EngineError> {
        let id = self.ids.next_session_id();
        let session = GameSession::new(id, config)?;
        self.sessions.insert(id, session);
        Ok(id)
    }

    /// Same as `create_session_with`, shuffling with `rng`.
    pub fn create_session_with_rng(
        &mut self,
        config: SessionConfig,
        rng: Box<dyn RandomSource + Send>,
    ) -> Result<SessionId, EngineError> {
        let id = self.ids.next_session_id();
        let session = GameSession::with_rng(id, config, rng)?;
        self.sessions.insert(id, session);
        Ok(id)
    }

    pub fn has_session(&self, session_id: SessionId) -> bool {
        self.sessions.contains_key(&session_id)
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn session(&self, session_id: SessionId) -> Result<&GameSession, EngineError> {
        self.sessions
            .get(&session_id)
            .ok_or(EngineError::SessionNotFound(session_id))
    }

    pub fn session_mut(&mut self, session_id: SessionId) -> Result<&mut GameSession, EngineError> {
        self.sessions
            .get_mut(&session_id)
            .ok_or(EngineError::SessionNotFound(session_id))
    }

    pub fn join_session(&mut self, session_id: SessionId, name: &str) -> Result<(PlayerId, SeatIndex), EngineError> {
        self.session_mut(session_id)?.join(name)
    }

    pub fn submit_action(
        &mut self,
        session_id: SessionId,
        player_id: PlayerId,
        kind: PlayerActionKind,
    ) -> Result<PublicState, EngineError> {
        self.session_mut(session_id)?.submit_action(player_id, kind)
    }

    pub fn get_public_state(&self, session_id: SessionId) -> Result<PublicState, EngineError> {
        Ok(self.session(session_id)?.public_state())
    }

    pub fn player_view(&self, session_id: SessionId, player_id: PlayerId) -> Result<PlayerView, EngineError> {
        self.session(session_id)?.player_view(player_id)
    }

    pub fn leave_session(&mut self, session_id: SessionId, player_id: PlayerId) -> Result<(), EngineError> {
        self.session_mut(session_id)?.leave(player_id)
    }

    /// Closes and forgets the room; returns its undrained events.
    pub fn close_session(&mut self, session_id: SessionId) -> Result<Vec<HandCompleted>, EngineError> {
        let mut session = self
            .sessions
            .remove(&session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        session.close();
        Ok(session.drain_events())
    }

    /// Forgets rooms that closed themselves (last player gone) and returns their
    /// undrained events.
    pub fn remove_closed(&mut self) -> Vec<(SessionId, Vec<HandCompleted>)> {
        let mut closed: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.is_closed())
            .map(|(id, _)| *id)
            .collect();
        closed.sort_unstable();
        closed
            .into_iter()
            .filter_map(|id| self.sessions.remove(&id).map(|mut session| (id, session.drain_events())))
            .collect()
    }

    pub fn drain_events(&mut self, session_id: SessionId) -> Result<Vec<HandCompleted>, EngineError> {
        Ok(self.session_mut(session_id)?.drain_events())
    }

    /// Advances every room's clock by `secs`.
    pub fn tick_all(&mut self, secs: u32) -> Vec<(SessionId, EngineError)> {
        let mut failures = Vec::new();
        for (id, session) in self.sessions.iter_mut() {
            if let Err(e) = session.tick(secs) {
                log::error!("session {}: tick failed: {}", id, e);
                failures.push((*id, e));
            }
        }
        failures
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
