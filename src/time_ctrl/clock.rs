//! Shot clock of the player to act.

use serde::{Deserialize, Serialize};

use super::{TimeBank, TimeRules};
use crate::domain::PlayerId;

/// Clock of the current turn.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnClock {
    /// Player whose turn is being timed.
    pub current_player: Option<PlayerId>,
    /// Base seconds left for this turn.
    pub remaining_action_secs: u32,
    /// Bank seconds already granted for this turn and not yet spent.
    pub remaining_extra_secs: u32,
}

/// Result of letting time pass.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeoutState {
    Ongoing,
    /// The base time ran out and a slice of the bank was drawn.
    UsedExtraTime { granted_secs: u32 },
    /// Base time and bank are both gone.
    TimedOut,
    NoActivePlayer,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_turn(&mut self, player_id: PlayerId, rules: &TimeRules) {
        self.current_player = Some(player_id);
        self.remaining_action_secs = rules.action_timeout_secs;
        self.remaining_extra_secs = 0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Seconds left before the turn times out, bank slices already granted included.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_action_secs + self.remaining_extra_secs
    }

    /// Lets `delta_secs` pass for the current player.
    ///
    /// Base time goes first. When it is gone, the bank is drawn on one
    /// `bank_step_secs` slice at a time; once both are spent the turn has timed out.
    pub fn elapse_for_current(&mut self, delta_secs: u32, rules: &TimeRules, bank: &mut TimeBank) -> TimeoutState {
        let player_id = match self.current_player {
            Some(pid) => pid,
            None => return TimeoutState::NoActivePlayer,
        };
        if delta_secs == 0 {
            return TimeoutState::Ongoing;
        }

        let mut remaining = delta_secs;

        if remaining < self.remaining_action_secs {
            self.remaining_action_secs -= remaining;
            return TimeoutState::Ongoing;
        }
        remaining -= self.remaining_action_secs;
        self.remaining_action_secs = 0;

        let mut granted_total = 0;
        loop {
            if remaining < self.remaining_extra_secs {
                self.remaining_extra_secs -= remaining;
                return if granted_total > 0 {
                    TimeoutState::UsedExtraTime {
                        granted_secs: granted_total,
                    }
                } else {
                    TimeoutState::Ongoing
                };
            }
            remaining -= self.remaining_extra_secs;
            self.remaining_extra_secs = 0;

            let granted = bank.grant_for_turn(player_id, rules.bank_step_secs);
            if granted == 0 {
                return TimeoutState::TimedOut;
            }
            granted_total += granted;
            self.remaining_extra_secs = granted;
        }
    }
}
