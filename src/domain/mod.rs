//! Poker domain model: cards, deck, chips, players, the table and its config.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

pub type PlayerId = u64;
pub type SessionId = u64;
/// Hand number within a session, starting at 1.
pub type HandId = u64;

// Re-exports so other modules can write crate::domain::Card and so on.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
