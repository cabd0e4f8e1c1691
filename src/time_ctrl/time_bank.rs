//! Per-player time banks: extra seconds left to each player.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::TimeRules;
use crate::domain::PlayerId;

/// One player's bank, in seconds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerTimeBank {
    pub remaining_secs: u32,
}

impl PlayerTimeBank {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            remaining_secs: initial_secs,
        }
    }

    /// Takes up to `requested` seconds out of the bank; returns what was granted.
    pub fn grant(&mut self, requested: u32) -> u32 {
        let grant = requested.min(self.remaining_secs);
        self.remaining_secs -= grant;
        grant
    }
}

/// Banks of every player in a room.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimeBank {
    players: HashMap<PlayerId, PlayerTimeBank>,
}

impl TimeBank {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    /// Opens a full bank for a newly seated player. Existing banks are kept.
    pub fn add_player(&mut self, rules: &TimeRules, player_id: PlayerId) {
        self.players
            .entry(player_id)
            .or_insert_with(|| PlayerTimeBank::new(rules.bank_per_player_secs));
    }

    pub fn remove_player(&mut self, player_id: PlayerId) {
        self.players.remove(&player_id);
    }

    /// Extra seconds for the current turn of `player_id`.
    pub fn grant_for_turn(&mut self, player_id: PlayerId, requested: u32) -> u32 {
        self.players
            .get_mut(&player_id)
            .map(|bank| bank.grant(requested))
            .unwrap_or(0)
    }

    pub fn remaining_for(&self, player_id: PlayerId) -> u32 {
        self.players
            .get(&player_id)
            .map(|b| b.remaining_secs)
            .unwrap_or(0)
    }
}
