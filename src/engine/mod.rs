//! Poker engine: betting, street transitions, side pots, showdown.
//!
//! One hand is a `HandEngine` driven against a `Table`:
//!   - `start_hand` deals a new hand
//!   - `apply_action` applies a player's action
//!   - `advance_if_needed` moves to the next street or settles the hand
//!
//! `GameSession` wraps a table across hands (joins, leaves, timeouts, events);
//! `SessionManager` keeps many sessions by id.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod session;
pub mod session_manager;
pub mod side_pots;
pub mod validation;

pub use actions::{ActionChoice, PlayerAction, PlayerActionKind};
pub use betting::{BettingState, RoundState};
pub use errors::{EngineError, IllegalReason};
pub use game_loop::{
    abandon_hand, advance_if_needed, apply_action, fold_out_of_turn, round_state, start_hand, HandEngine,
    HandStatus,
};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use session::GameSession;
pub use session_manager::SessionManager;
pub use side_pots::{Contribution, SidePot};

use crate::domain::Card;

/// Source of shuffles for the deck. Implementations live in `infra`.
pub trait RandomSource {
    fn shuffle(&mut self, cards: &mut [Card]);
}
