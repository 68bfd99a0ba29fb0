pub mod connection;
pub mod handler;
pub mod room;
pub mod types;

pub use connection::{RoomRouter, WsSender};
pub use handler::ws_handler;
pub use room::GroupKey;
