//! Live alert channel for the admin console.
//!
//! [`WsManager`] tracks open sessions, [`ws_handler`] upgrades requests into
//! sessions and [`start_heartbeat`] closes the ones that stop answering.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
