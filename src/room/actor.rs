//! Room actor: one task owns one `GameSession` and applies messages in receipt order.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

use super::messages::RoomMessage;
use crate::api::dto::{PlayerView, PublicState};
use crate::api::events::HandCompleted;
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::{ActionChoice, EngineError, GameSession, PlayerActionKind};

/// Cloneable address of a running room.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    session_id: SessionId,
}

impl RoomHandle {
    pub fn new(sender: mpsc::Sender<RoomMessage>, session_id: SessionId) -> Self {
        Self { sender, session_id }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Waits until the actor has stopped.
    pub async fn closed(&self) {
        self.sender.closed().await
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> RoomMessage) -> Result<T, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(build(tx))
            .await
            .map_err(|_| EngineError::SessionClosed)?;
        rx.await.map_err(|_| EngineError::SessionClosed)
    }

    pub async fn join(&self, name: impl Into<String>) -> Result<(PlayerId, SeatIndex), EngineError> {
        let name = name.into();
        self.request(|response| RoomMessage::Join { name, response }).await?
    }

    pub async fn leave(&self, player_id: PlayerId) -> Result<(), EngineError> {
        self.request(|response| RoomMessage::Leave { player_id, response })
            .await?
    }

    pub async fn sit_out(&self, player_id: PlayerId) -> Result<(), EngineError> {
        self.request(|response| RoomMessage::SitOut { player_id, response })
            .await?
    }

    pub async fn sit_in(&self, player_id: PlayerId) -> Result<(), EngineError> {
        self.request(|response| RoomMessage::SitIn { player_id, response })
            .await?
    }

    pub async fn disconnect(&self, player_id: PlayerId) -> Result<(), EngineError> {
        self.request(|response| RoomMessage::Disconnect { player_id, response })
            .await?
    }

    pub async fn reconnect(&self, player_id: PlayerId) -> Result<(), EngineError> {
        self.request(|response| RoomMessage::Reconnect { player_id, response })
            .await?
    }

    pub async fn start_hand(&self) -> Result<(), EngineError> {
        self.request(|response| RoomMessage::StartHand { response }).await?
    }

    pub async fn submit_action(&self, player_id: PlayerId, kind: PlayerActionKind) -> Result<PublicState, EngineError> {
        self.request(|response| RoomMessage::TakeAction {
            player_id,
            kind,
            response,
        })
        .await?
    }

    pub async fn public_state(&self) -> Result<PublicState, EngineError> {
        self.request(|response| RoomMessage::GetPublicState { response })
            .await
    }

    pub async fn player_view(&self, player_id: PlayerId) -> Result<PlayerView, EngineError> {
        self.request(|response| RoomMessage::GetPlayerView { player_id, response })
            .await?
    }

    pub async fn legal_actions(&self, player_id: PlayerId) -> Result<Vec<ActionChoice>, EngineError> {
        self.request(|response| RoomMessage::GetLegalActions { player_id, response })
            .await
    }

    /// Closes the room and returns events that had not been forwarded yet.
    pub async fn close(&self) -> Result<Vec<HandCompleted>, EngineError> {
        self.request(|response| RoomMessage::Close { response }).await
    }
}

/// Owns one room. Messages and clock ticks are handled one at a time, so the
/// session never sees concurrent writers.
pub struct RoomActor {
    session: GameSession,
    inbox: mpsc::Receiver<RoomMessage>,
    /// Completed hands go here when set.
    events: Option<mpsc::UnboundedSender<HandCompleted>>,
    tick_every: Duration,
    /// Elapsed milliseconds not yet passed on to the turn clock.
    pending_ms: u64,
}

impl RoomActor {
    pub fn new(
        session: GameSession,
        inbox_capacity: usize,
        tick_interval_ms: u64,
        events: Option<mpsc::UnboundedSender<HandCompleted>>,
    ) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(inbox_capacity.max(1));
        let handle = RoomHandle::new(sender, session.id());
        let actor = Self {
            session,
            inbox,
            events,
            tick_every: Duration::from_millis(tick_interval_ms.max(1)),
            pending_ms: 0,
        };
        (actor, handle)
    }

    pub async fn run(mut self) {
        let id = self.session.id();
        log::info!("room {} running", id);

        let mut ticker = interval(self.tick_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    let Some(message) = message else {
                        // Every handle is gone.
                        self.session.close();
                        break;
                    };
                    let stop = self.handle_message(message);
                    self.forward_events();
                    if stop {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    let now = Instant::now();
                    self.on_tick(now.duration_since(last_tick));
                    last_tick = now;
                    self.forward_events();
                }
            }

            // The last player left, or the room was closed some other way.
            if self.session.is_closed() {
                break;
            }
        }

        log::info!("room {} stopped", id);
    }

    /// Returns true when the actor should stop.
    fn handle_message(&mut self, message: RoomMessage) -> bool {
        let id = self.session.id();
        match message {
            RoomMessage::Join { name, response } => {
                let _ = response.send(self.session.join(&name));
            }
            RoomMessage::Leave { player_id, response } => {
                let _ = response.send(self.session.leave(player_id));
            }
            RoomMessage::SitOut { player_id, response } => {
                let _ = response.send(self.session.sit_out(player_id));
            }
            RoomMessage::SitIn { player_id, response } => {
                let _ = response.send(self.session.sit_in(player_id));
            }
            RoomMessage::Disconnect { player_id, response } => {
                let _ = response.send(self.session.disconnect(player_id));
            }
            RoomMessage::Reconnect { player_id, response } => {
                let _ = response.send(self.session.reconnect(player_id));
            }
            RoomMessage::StartHand { response } => {
                let _ = response.send(self.session.start_hand());
            }
            RoomMessage::TakeAction {
                player_id,
                kind,
                response,
            } => {
                let result = self.session.submit_action(player_id, kind);
                if let Err(e) = &result {
                    log::warn!("room {}: rejected {} from player {}: {}", id, kind, player_id, e);
                }
                let _ = response.send(result);
            }
            RoomMessage::GetPublicState { response } => {
                let _ = response.send(self.session.public_state());
            }
            RoomMessage::GetPlayerView { player_id, response } => {
                let _ = response.send(self.session.player_view(player_id));
            }
            RoomMessage::GetLegalActions { player_id, response } => {
                let _ = response.send(self.session.legal_actions(player_id));
            }
            RoomMessage::Close { response } => {
                self.session.close();
                let _ = response.send(self.session.drain_events());
                return true;
            }
        }
        false
    }

    fn on_tick(&mut self, elapsed: Duration) {
        self.pending_ms += elapsed.as_millis() as u64;
        let secs = (self.pending_ms / 1000) as u32;
        self.pending_ms %= 1000;

        match self.session.tick(secs) {
            Ok(true) => log::debug!("room {}: default action applied on timeout", self.session.id()),
            Ok(false) => {}
            Err(e) => log::error!("room {}: tick failed: {}", self.session.id(), e),
        }
    }

    /// Sends completed hands on, or drops them when nobody listens.
    fn forward_events(&mut self) {
        let drained = self.session.drain_events();
        let Some(events) = &self.events else {
            if !drained.is_empty() {
                log::debug!("room {}: dropped {} unobserved hand events", self.session.id(), drained.len());
            }
            return;
        };
        for event in drained {
            if events.send(event).is_err() {
                log::warn!("room {}: event receiver dropped", self.session.id());
                self.events = None;
                break;
            }
        }
    }
}
