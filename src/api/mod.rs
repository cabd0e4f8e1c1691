//! External API of the engine.
//!
//! - commands: everything that changes state (create a room, join, act);
//! - queries: read-only;
//! - dto: public snapshots for clients, with private cards kept out;
//! - events: the completed-hand record for statistics consumers;
//! - errors: what a client gets back when a call fails.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod events;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use events::*;
pub use queries::*;
