//! Delivery of admin alerts to live sessions.
//!
//! The [`AlertRouter`] subscribes to the alert bus and pushes every alert
//! to all connected admin WebSocket clients.

pub mod router;

pub use router::{alert_message, AlertRouter};
