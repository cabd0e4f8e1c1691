//! Action time control: rules, per-player time banks and the turn clock.
//!
//! `TimeController` is the facade a session drives: start a turn, report a manual
//! action, let time pass and learn when a default action is due.

pub mod clock;
pub mod time_bank;
pub mod time_rules;

pub use clock::{TimeoutState, TurnClock};
pub use time_bank::{PlayerTimeBank, TimeBank};
pub use time_rules::TimeRules;

use crate::domain::PlayerId;

/// What the engine has to do after time has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoActionDecision {
    None,
    /// The player to act is out of time: check if possible, otherwise fold.
    TimeoutCheckOrFold(PlayerId),
}

/// Time control of one room.
#[derive(Clone, Debug)]
pub struct TimeController {
    pub rules: TimeRules,
    pub bank: TimeBank,
    pub clock: TurnClock,
}

impl TimeController {
    pub fn new(rules: TimeRules) -> Self {
        Self {
            rules,
            bank: TimeBank::new(),
            clock: TurnClock::new(),
        }
    }

    pub fn add_player(&mut self, player_id: PlayerId) {
        self.bank.add_player(&self.rules, player_id);
    }

    pub fn remove_player(&mut self, player_id: PlayerId) {
        self.bank.remove_player(player_id);
        if self.clock.current_player == Some(player_id) {
            self.clock.clear();
        }
    }

    /// Starts the clock for `player_id` unless it is already running for them.
    pub fn ensure_turn(&mut self, player_id: Option<PlayerId>) {
        match player_id {
            Some(pid) if self.clock.current_player != Some(pid) => self.clock.start_turn(pid, &self.rules),
            Some(_) => {}
            None => self.clock.clear(),
        }
    }

    /// The player acted in time.
    pub fn on_manual_action(&mut self, player_id: PlayerId) {
        if self.clock.current_player == Some(player_id) {
            self.clock.clear();
        }
    }

    /// Lets `delta_secs` pass for the player to act.
    pub fn on_time_passed(&mut self, delta_secs: u32) -> AutoActionDecision {
        let current = self.clock.current_player;
        match self.clock.elapse_for_current(delta_secs, &self.rules, &mut self.bank) {
            TimeoutState::TimedOut => match current {
                Some(pid) => {
                    self.clock.clear();
                    AutoActionDecision::TimeoutCheckOrFold(pid)
                }
                None => AutoActionDecision::None,
            },
            TimeoutState::Ongoing | TimeoutState::UsedExtraTime { .. } | TimeoutState::NoActivePlayer => {
                AutoActionDecision::None
            }
        }
    }
}
