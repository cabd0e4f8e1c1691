//! Spawns and tracks room actors.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use super::actor::{RoomActor, RoomHandle};
use crate::api::events::HandCompleted;
use crate::domain::table::SessionConfig;
use crate::domain::SessionId;
use crate::engine::{EngineError, GameSession, RandomSource};
use crate::infra::config::EngineConfig;
use crate::infra::ids::IdGenerator;

/// Async counterpart of `SessionManager`: every room runs in its own task.
pub struct RoomManager {
    config: EngineConfig,
    rooms: Arc<RwLock<HashMap<SessionId, RoomHandle>>>,
    ids: IdGenerator,
}

impl RoomManager {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rooms: Arc::new(RwLock::new(HashMap::new())),
            ids: IdGenerator::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Opens a room and spawns its actor. `None` uses the default session config.
    /// Completed hands are sent to `events` when given.
    pub async fn create_room(
        &self,
        config: Option<SessionConfig>,
        events: Option<mpsc::UnboundedSender<HandCompleted>>,
    ) -> Result<RoomHandle, EngineError> {
        let id = self.ids.next_session_id();
        let config = config.unwrap_or_else(|| self.config.session.clone());
        let session = GameSession::new(id, config)?;
        Ok(self.spawn(session, events).await)
    }

    /// Same as `create_room`, shuffling with `rng`.
    pub async fn create_room_with_rng(
        &self,
        config: SessionConfig,
        rng: Box<dyn RandomSource + Send>,
        events: Option<mpsc::UnboundedSender<HandCompleted>>,
    ) -> Result<RoomHandle, EngineError> {
        let id = self.ids.next_session_id();
        let session = GameSession::with_rng(id, config, rng)?;
        Ok(self.spawn(session, events).await)
    }

    async fn spawn(&self, session: GameSession, events: Option<mpsc::UnboundedSender<HandCompleted>>) -> RoomHandle {
        let id = session.id();
        let (actor, handle) = RoomActor::new(
            session,
            self.config.room_inbox_capacity,
            self.config.tick_interval_ms,
            events,
        );

        self.rooms.write().await.insert(id, handle.clone());
        tokio::spawn(actor.run());

        log::info!("created room {}", id);
        handle
    }

    /// Handle of a running room. Rooms that stopped on their own are forgotten here.
    pub async fn room(&self, session_id: SessionId) -> Result<RoomHandle, EngineError> {
        let mut rooms = self.rooms.write().await;
        match rooms.get(&session_id) {
            Some(handle) if !handle.is_closed() => Ok(handle.clone()),
            Some(_) => {
                rooms.remove(&session_id);
                Err(EngineError::SessionNotFound(session_id))
            }
            None => Err(EngineError::SessionNotFound(session_id)),
        }
    }

    /// Ids of running rooms, oldest first.
    pub async fn room_ids(&self) -> Vec<SessionId> {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, handle| !handle.is_closed());
        let mut ids: Vec<SessionId> = rooms.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Stops the room's actor and forgets it. Returns its unforwarded events.
    pub async fn close_room(&self, session_id: SessionId) -> Result<Vec<HandCompleted>, EngineError> {
        let handle = self
            .rooms
            .write()
            .await
            .remove(&session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        let events = match handle.close().await {
            Ok(events) => events,
            // Stopped by itself in the meantime.
            Err(EngineError::SessionClosed) => Vec::new(),
            Err(e) => return Err(e),
        };
        log::info!("closed room {}", session_id);
        Ok(events)
    }
}
