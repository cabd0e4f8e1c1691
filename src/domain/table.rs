use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::Player;
use crate::domain::{HandId, PlayerId, SessionId};
use crate::time_ctrl::TimeRules;

/// Seat index at the table (0..max_players-1).
pub type SeatIndex = u8;

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 10;

/// Blinds. Fixed for the life of a session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

impl Default for TableStakes {
    fn default() -> Self {
        Self::new(Chips(10), Chips(20))
    }
}

/// Configuration of one room.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub name: String,
    /// Seats at the table, 2..=10.
    pub max_players: u8,
    pub stakes: TableStakes,
    pub starting_stack: Chips,
    /// Deal the next hand as soon as the previous one is settled.
    pub auto_deal: bool,
    /// How many ready players an auto-dealt hand waits for.
    pub min_players_to_start: u8,
    /// Burn one card before the flop, turn and river.
    pub burn_cards: bool,
    pub time_rules: TimeRules,
    /// Base seed for reproducible shuffles. `None` uses the system RNG.
    pub deck_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "Hold'em".to_string(),
            max_players: MAX_PLAYERS,
            stakes: TableStakes::default(),
            starting_stack: Chips(10_000),
            auto_deal: true,
            min_players_to_start: MIN_PLAYERS,
            burn_cards: true,
            time_rules: TimeRules::default(),
            deck_seed: None,
        }
    }
}

impl SessionConfig {
    /// Default 10/20 room for `player_count` seats.
    pub fn new(player_count: u8) -> Self {
        Self {
            max_players: player_count,
            ..Self::default()
        }
    }

    pub fn with_blinds(mut self, small_blind: u64, big_blind: u64) -> Self {
        self.stakes = TableStakes::new(Chips(small_blind), Chips(big_blind));
        self
    }

    pub fn with_auto_deal(mut self, auto_deal: bool) -> Self {
        self.auto_deal = auto_deal;
        self
    }

    pub fn with_deck_seed(mut self, seed: u64) -> Self {
        self.deck_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(format!(
                "max_players must be within {MIN_PLAYERS}..={MAX_PLAYERS}, got {}",
                self.max_players
            ));
        }
        if self.stakes.small_blind.is_zero() {
            return Err("small_blind = 0".into());
        }
        if self.stakes.big_blind <= self.stakes.small_blind {
            return Err(format!(
                "big_blind ({}) <= small_blind ({})",
                self.stakes.big_blind, self.stakes.small_blind
            ));
        }
        if self.starting_stack.is_zero() {
            return Err("starting_stack = 0".into());
        }
        if self.min_players_to_start < MIN_PLAYERS || self.min_players_to_start > self.max_players
        {
            return Err(format!(
                "min_players_to_start must be within {MIN_PLAYERS}..={}, got {}",
                self.max_players, self.min_players_to_start
            ));
        }
        self.time_rules.validate()
    }
}

/// Table state of one room.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: SessionId,
    pub name: String,
    pub config: SessionConfig,

    /// Seats: vector index = SeatIndex, `None` = empty seat.
    pub seats: Vec<Option<Player>>,

    /// Community cards (0..=5), append-only within a hand.
    pub board: Vec<Card>,

    /// Button seat, `None` before the first hand.
    pub dealer_button: Option<SeatIndex>,

    /// Hands started so far; the running hand's number while one is in progress.
    pub hand_number: HandId,

    pub street: Street,

    pub hand_in_progress: bool,

    /// Chips committed in the running hand.
    pub total_pot: Chips,
}

impl Table {
    pub fn new(id: SessionId, config: SessionConfig) -> Self {
        let seats = vec![None; config.max_players as usize];
        Self {
            id,
            name: config.name.clone(),
            config,
            seats,
            board: Vec::new(),
            dealer_button: None,
            hand_number: 0,
            street: Street::Preflop,
            hand_in_progress: false,
            total_pot: Chips::ZERO,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_players
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    pub fn first_empty_seat(&self) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|s| s.is_none())
            .map(|i| i as SeatIndex)
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|s| s.as_ref().map(|p| p.id) == Some(player_id))
            .map(|i| i as SeatIndex)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players().find(|(_, p)| p.id == player_id).map(|(_, p)| p)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.seats
            .iter_mut()
            .flatten()
            .find(|p| p.id == player_id)
    }

    pub fn player_at(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat as usize).and_then(|s| s.as_ref())
    }

    pub fn player_at_mut(&mut self, seat: SeatIndex) -> Option<&mut Player> {
        self.seats.get_mut(seat as usize).and_then(|s| s.as_mut())
    }

    /// Occupied seats in seat order.
    pub fn players(&self) -> impl Iterator<Item = (SeatIndex, &Player)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i as SeatIndex, p)))
    }

    pub fn name_taken(&self, name: &str) -> bool {
        self.players().any(|(_, p)| p.name.eq_ignore_ascii_case(name))
    }

    /// Players that will be dealt into the next hand.
    pub fn ready_count(&self) -> usize {
        self.players().filter(|(_, p)| p.wants_next_hand()).count()
    }

    /// Players still holding cards in the running hand.
    pub fn in_hand_count(&self) -> usize {
        self.players().filter(|(_, p)| p.is_in_hand()).count()
    }

    /// Players able to bet in the running hand.
    pub fn can_act_count(&self) -> usize {
        self.players().filter(|(_, p)| p.can_act()).count()
    }
}
