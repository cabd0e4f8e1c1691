//! Multiplayer Texas Hold'em engine.
//!
//! Layers, leaves first:
//! - `domain`: cards, deck, chips, players, table;
//! - `eval`: hand evaluation;
//! - `engine`: betting, streets, side pots, showdown, sessions;
//! - `time_ctrl`: action clock and timeout policy;
//! - `api`: public snapshots, events and errors for the transport layer;
//! - `infra`: RNG, ids, configuration;
//! - `room`: one async actor per room.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod room;
pub mod time_ctrl;
