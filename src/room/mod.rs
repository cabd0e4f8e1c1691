//! Asynchronous rooms: one tokio task per room, commands over a bounded channel.

pub mod actor;
pub mod manager;
pub mod messages;

pub use actor::{RoomActor, RoomHandle};
pub use manager::RoomManager;
pub use messages::RoomMessage;
