use std::collections::VecDeque;

use crate::api::dto::{PlayerView, PublicState};
use crate::api::events::HandCompleted;
use crate::api::queries::{build_player_view, build_public_state};
use crate::domain::chips::Chips;
use crate::domain::hand::HandSummary;
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::table::{SessionConfig, Table};
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::actions::{ActionChoice, PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{
    abandon_hand, advance_if_needed, apply_action, apply_validated, fold_out_of_turn, start_hand, HandEngine,
    HandStatus,
};
use crate::engine::hand_history::HandHistory;
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;
use crate::infra::rng::SystemRng;
use crate::infra::rng_seed::RngSeed;
use crate::time_ctrl::{AutoActionDecision, TimeController};

/// Longest accepted display name, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// Hands dealt back to back inside one call when each ends before anyone acts
/// (everyone all-in on the blinds). The rest wait for the next tick.
const MAX_HANDS_PER_STEP: usize = 64;

/// Where the shuffles of a session come from.
enum Shuffler {
    /// A fresh generator per hand, seeded from the base seed, session id and hand number.
    Seeded(RngSeed),
    Source(Box<dyn RandomSource + Send>),
}

/// One room across hands: seating, hand lifecycle, time control and the
/// queue of completed-hand events.
///
/// All state changes go through `&mut self`, so a session is a single writer;
/// `room::RoomActor` owns one per task.
pub struct GameSession {
    table: Table,
    hand: Option<HandEngine>,
    shuffler: Shuffler,
    player_ids: IdGenerator,
    time: TimeController,
    events: VecDeque<HandCompleted>,
    last_history: Option<HandHistory>,
    closed: bool,
}

impl GameSession {
    /// Opens a room. Shuffles come from `deck_seed` when the config sets one,
    /// otherwise from the system RNG.
    pub fn new(id: SessionId, config: SessionConfig) -> Result<Self, EngineError> {
        let shuffler = match config.deck_seed {
            Some(seed) => Shuffler::Seeded(RngSeed::from_u64(seed)),
            None => Shuffler::Source(Box::new(SystemRng)),
        };
        Self::build(id, config, shuffler)
    }

    /// Opens a room that shuffles with `rng` (stacked decks, replays).
    pub fn with_rng(id: SessionId, config: SessionConfig, rng: Box<dyn RandomSource + Send>) -> Result<Self, EngineError> {
        Self::build(id, config, Shuffler::Source(rng))
    }

    fn build(id: SessionId, config: SessionConfig, shuffler: Shuffler) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        let time = TimeController::new(config.time_rules.clone());
        log::info!(
            "session {} opened: {} seats, blinds {}/{}",
            id,
            config.max_players,
            config.stakes.small_blind,
            config.stakes.big_blind
        );
        Ok(Self {
            table: Table::new(id, config),
            hand: None,
            shuffler,
            player_ids: IdGenerator::new(),
            time,
            events: VecDeque::new(),
            last_history: None,
            closed: false,
        })
    }

    pub fn id(&self) -> SessionId {
        self.table.id
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn hand(&self) -> Option<&HandEngine> {
        self.hand.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.hand
            .as_ref()
            .and_then(|h| h.current_actor)
            .and_then(|seat| self.table.player_at(seat))
            .map(|p| p.id)
    }

    /// Seats a new player with the starting stack. They are dealt in from the next hand.
    pub fn join(&mut self, name: &str) -> Result<(PlayerId, SeatIndex), EngineError> {
        self.ensure_open()?;

        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(EngineError::InvalidName(name.to_string()));
        }
        let seat = self.table.first_empty_seat().ok_or(EngineError::RoomFull)?;
        if self.table.name_taken(name) {
            return Err(EngineError::NameTaken(name.to_string()));
        }

        let player_id = self.player_ids.next_player_id();

        let player = Player::new(player_id, name, self.table.config.starting_stack);
        self.table.seats[seat as usize] = Some(player);
        self.time.add_player(player_id);

        log::info!(
            "session {}: {} joined as player {} at seat {}",
            self.table.id,
            name,
            player_id,
            seat
        );

        self.maybe_auto_deal()?;
        Ok((player_id, seat))
    }

    /// Takes a player off the table. Someone dealt into the running hand is folded
    /// at once and removed when the hand is settled.
    pub fn leave(&mut self, player_id: PlayerId) -> Result<(), EngineError> {
        let seat = self
            .table
            .seat_of(player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;

        let dealt_in = self.table.hand_in_progress
            && self
                .table
                .player_at(seat)
                .map(|p| !p.hole_cards.is_empty())
                .unwrap_or(false);

        if !dealt_in {
            self.remove_player(seat);
            self.close_if_deserted();
            return Ok(());
        }

        if let Some(p) = self.table.player_at_mut(seat) {
            p.leaving = true;
        }
        log::info!(
            "session {}: player {} leaves during hand #{}",
            self.table.id,
            player_id,
            self.table.hand_number
        );

        let mut engine = self.hand.take().ok_or(EngineError::Internal("hand in progress without engine"))?;
        match fold_out_of_turn(&mut self.table, &mut engine, player_id) {
            Ok(status) => self.run_until_blocked(engine, status),
            Err(e) => {
                self.hand = Some(engine);
                Err(e)
            }
        }
    }

    /// Stops dealing the player in from the next hand. The running hand is not affected.
    pub fn sit_out(&mut self, player_id: PlayerId) -> Result<(), EngineError> {
        let in_hand = self.table.hand_in_progress;
        let p = self
            .table
            .player_mut(player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;
        p.sit_out_next = true;
        if !in_hand || p.hole_cards.is_empty() {
            p.status = p.idle_status();
        }
        Ok(())
    }

    pub fn sit_in(&mut self, player_id: PlayerId) -> Result<(), EngineError> {
        self.ensure_open()?;
        let p = self
            .table
            .player_mut(player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;
        p.sit_out_next = false;
        p.consecutive_timeouts = 0;
        self.maybe_auto_deal()
    }

    /// Connection lost. A player in the running hand keeps their cards; the
    /// clock acts for them. From the next hand on they are not dealt in.
    pub fn disconnect(&mut self, player_id: PlayerId) -> Result<(), EngineError> {
        let in_hand = self.table.hand_in_progress;
        let p = self
            .table
            .player_mut(player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;
        p.connected = false;
        if !in_hand || p.hole_cards.is_empty() {
            p.status = PlayerStatus::Disconnected;
        }
        log::info!("session {}: player {} disconnected", self.table.id, player_id);
        Ok(())
    }

    pub fn reconnect(&mut self, player_id: PlayerId) -> Result<(), EngineError> {
        let p = self
            .table
            .player_mut(player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;
        p.connected = true;
        if p.status == PlayerStatus::Disconnected {
            p.status = PlayerStatus::SittingOut;
        }
        log::info!("session {}: player {} reconnected", self.table.id, player_id);
        self.maybe_auto_deal()
    }

    /// Deals a new hand now, regardless of `auto_deal`.
    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        self.ensure_open()?;
        if self.hand.is_some() || self.table.hand_in_progress {
            return Err(EngineError::HandAlreadyInProgress);
        }
        let (engine, status) = self.deal()?;
        self.run_until_blocked(engine, status)
    }

    /// Applies an action of the player to act. On error nothing changes.
    pub fn submit_action(&mut self, player_id: PlayerId, kind: PlayerActionKind) -> Result<PublicState, EngineError> {
        self.ensure_open()?;
        let mut engine = self.hand.take().ok_or(EngineError::HandNotInProgress)?;

        match apply_action(&mut self.table, &mut engine, PlayerAction::new(player_id, kind)) {
            Ok(status) => {
                if let Some(p) = self.table.player_mut(player_id) {
                    p.consecutive_timeouts = 0;
                }
                self.time.on_manual_action(player_id);
                self.run_until_blocked(engine, status)?;
                Ok(self.public_state())
            }
            Err(e) => {
                self.hand = Some(engine);
                Err(e)
            }
        }
    }

    /// Acts for the player to act: check when checking is legal, otherwise fold.
    /// Counts toward sitting the player out.
    pub fn force_default_action(&mut self, player_id: PlayerId) -> Result<PublicState, EngineError> {
        self.ensure_open()?;
        let engine = self.hand.as_ref().ok_or(EngineError::HandNotInProgress)?;
        let seat = self
            .table
            .seat_of(player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;
        if engine.current_actor != Some(seat) {
            return Err(EngineError::NotYourTurn(player_id));
        }

        let kind = if engine
            .legal_actions(&self.table, player_id)
            .contains(&ActionChoice::Check)
        {
            PlayerActionKind::Check
        } else {
            PlayerActionKind::Fold
        };

        let mut engine = self.hand.take().ok_or(EngineError::HandNotInProgress)?;
        let status = apply_validated(&mut self.table, &mut engine, seat, kind, true)
            .and_then(|_| advance_if_needed(&mut self.table, &mut engine));
        let status = match status {
            Ok(status) => status,
            Err(e) => {
                self.hand = Some(engine);
                return Err(e);
            }
        };

        // The clock ran for this turn only; the player's next turn starts afresh.
        self.time.clock.clear();

        let table_id = self.table.id;
        let threshold = self.time.rules.sit_out_after_timeouts;
        if let Some(p) = self.table.player_mut(player_id) {
            p.consecutive_timeouts += 1;
            log::warn!(
                "session {}: player {} timed out ({} in a row), forced {}",
                table_id,
                player_id,
                p.consecutive_timeouts,
                kind
            );
            if threshold > 0 && p.consecutive_timeouts >= threshold && !p.sit_out_next {
                p.sit_out_next = true;
                log::info!(
                    "session {}: player {} sits out from the next hand",
                    table_id,
                    player_id
                );
            }
        }

        self.run_until_blocked(engine, status)?;
        Ok(self.public_state())
    }

    /// Lets `secs` pass on the clock of the player to act and forces their
    /// default action when they run out of time. Between hands, deals the next
    /// one if it is due. Returns whether an action was forced.
    pub fn tick(&mut self, secs: u32) -> Result<bool, EngineError> {
        if self.closed {
            return Ok(false);
        }
        if self.hand.is_none() {
            self.maybe_auto_deal()?;
            return Ok(false);
        }
        match self.time.on_time_passed(secs) {
            AutoActionDecision::TimeoutCheckOrFold(player_id) => {
                self.force_default_action(player_id)?;
                Ok(true)
            }
            AutoActionDecision::None => Ok(false),
        }
    }

    pub fn legal_actions(&self, player_id: PlayerId) -> Vec<ActionChoice> {
        self.hand
            .as_ref()
            .map(|h| h.legal_actions(&self.table, player_id))
            .unwrap_or_default()
    }

    pub fn public_state(&self) -> PublicState {
        build_public_state(&self.table, self.hand.as_ref(), self.closed)
    }

    /// The room as `player_id` sees it, own hole cards included.
    pub fn player_view(&self, player_id: PlayerId) -> Result<PlayerView, EngineError> {
        let time_left = match self.time.clock.current_player {
            Some(pid) if pid == player_id => Some(self.time.clock.remaining_secs()),
            _ => None,
        };
        build_player_view(&self.table, self.hand.as_ref(), self.closed, player_id, time_left)
    }

    /// Completed-hand events since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<HandCompleted> {
        self.events.drain(..).collect()
    }

    /// Full log of the last settled hand.
    pub fn last_history(&self) -> Option<&HandHistory> {
        self.last_history.as_ref()
    }

    /// Closes the room. A running hand is abandoned and every contribution returned.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Some(mut engine) = self.hand.take() {
            abandon_hand(&mut self.table, &mut engine);
            self.last_history = Some(engine.history);
        }
        self.time.clock.clear();
        self.closed = true;
        log::info!(
            "session {} closed after {} hands",
            self.table.id,
            self.table.hand_number
        );
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.closed {
            Err(EngineError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn deal(&mut self) -> Result<(HandEngine, HandStatus), EngineError> {
        let hand_number = self.table.hand_number + 1;
        let mut engine = match &mut self.shuffler {
            Shuffler::Seeded(seed) => {
                let mut rng = seed.derive(self.table.id, hand_number).to_rng();
                start_hand(&mut self.table, &mut rng)?
            }
            Shuffler::Source(rng) => start_hand(&mut self.table, rng.as_mut())?,
        };
        let status = advance_if_needed(&mut self.table, &mut engine)?;
        Ok((engine, status))
    }

    /// Stores a running hand, or settles a finished one and keeps dealing while
    /// `auto_deal` asks for it and hands end on their own.
    fn run_until_blocked(&mut self, engine: HandEngine, status: HandStatus) -> Result<(), EngineError> {
        let mut engine = engine;
        let mut status = status;
        let mut dealt = 0;

        loop {
            match status {
                HandStatus::Ongoing => {
                    self.hand = Some(engine);
                    let actor = self.current_player();
                    self.time.ensure_turn(actor);
                    return Ok(());
                }
                HandStatus::Finished(summary, history) => {
                    self.hand = None;
                    self.time.clock.clear();
                    self.settle(&summary, history);

                    if dealt >= MAX_HANDS_PER_STEP || !self.auto_deal_due() {
                        return Ok(());
                    }
                    let (next_engine, next_status) = self.deal()?;
                    engine = next_engine;
                    status = next_status;
                    dealt += 1;
                }
            }
        }
    }

    fn maybe_auto_deal(&mut self) -> Result<(), EngineError> {
        if !self.auto_deal_due() {
            return Ok(());
        }
        let (engine, status) = self.deal()?;
        self.run_until_blocked(engine, status)
    }

    fn auto_deal_due(&self) -> bool {
        !self.closed
            && self.table.config.auto_deal
            && self.hand.is_none()
            && !self.table.hand_in_progress
            && self.table.ready_count() >= self.table.config.min_players_to_start as usize
    }

    /// Post-hand bookkeeping: drops busted and departing players, queues the event.
    fn settle(&mut self, summary: &HandSummary, history: HandHistory) {
        let mut eliminated = Vec::new();
        let mut departing = Vec::new();
        for (seat, p) in self.table.players() {
            if p.stack.is_zero() {
                eliminated.push(p.id);
                departing.push(seat);
            } else if p.leaving {
                departing.push(seat);
            }
        }
        for seat in departing {
            self.remove_player(seat);
        }
        for id in &eliminated {
            log::info!("session {}: player {} eliminated", self.table.id, id);
        }

        for p in self.table.seats.iter_mut().flatten() {
            p.hole_cards.clear();
            p.contribution = Chips::ZERO;
            p.status = p.idle_status();
        }

        self.events.push_back(HandCompleted::from_summary(summary, eliminated));
        self.last_history = Some(history);
        self.close_if_deserted();
    }

    fn remove_player(&mut self, seat: SeatIndex) {
        if let Some(p) = self.table.seats.get_mut(seat as usize).and_then(Option::take) {
            self.time.remove_player(p.id);
            log::info!(
                "session {}: player {} left seat {} with {}",
                self.table.id,
                p.id,
                seat,
                p.stack
            );
        }
    }

    /// After play has begun, a room with one player or none is over.
    fn close_if_deserted(&mut self) {
        if self.table.hand_number > 0 && !self.table.hand_in_progress && self.table.seated_count() <= 1 {
            self.close();
        }
    }
}
