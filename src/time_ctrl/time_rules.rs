//! Action timing rules.
//!
//! Only the rules live here; no state and no reference to a particular room.

use serde::{Deserialize, Serialize};

/// Timing rules of one room.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeRules {
    /// Seconds for each decision.
    pub action_timeout_secs: u32,
    /// Extra seconds each player may draw on over the whole session. 0 disables the bank.
    pub bank_per_player_secs: u32,
    /// Slice of the bank granted at a time once the base time runs out.
    pub bank_step_secs: u32,
    /// Forced actions in a row before the player is sat out from the next hand. 0 never sits out.
    pub sit_out_after_timeouts: u32,
}

impl TimeRules {
    pub const fn new(action_timeout_secs: u32, sit_out_after_timeouts: u32) -> Self {
        Self {
            action_timeout_secs,
            bank_per_player_secs: 0,
            bank_step_secs: 10,
            sit_out_after_timeouts,
        }
    }

    /// 30 seconds a decision, sat out after two timeouts in a row, no bank.
    pub const fn standard() -> Self {
        Self::new(30, 2)
    }

    pub const fn with_bank(mut self, bank_per_player_secs: u32, bank_step_secs: u32) -> Self {
        self.bank_per_player_secs = bank_per_player_secs;
        self.bank_step_secs = bank_step_secs;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.action_timeout_secs == 0 {
            return Err("action_timeout_secs must be positive".to_string());
        }
        if self.bank_per_player_secs > 0 && self.bank_step_secs == 0 {
            return Err("bank_step_secs must be positive when a time bank is set".to_string());
        }
        Ok(())
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
