//! Deal4Bank alerting and outbound email.
//!
//! - [`AlertBus`]: in-process publish/subscribe hub for [`AdminAlert`]s,
//!   backed by `tokio::sync::broadcast`.
//! - [`NotificationListener`]: background task that turns freshly written
//!   notification documents into alerts.
//! - [`delivery`]: the transactional email provider client.

pub mod bus;
pub mod delivery;
pub mod listener;

pub use bus::{AdminAlert, AlertBus};
pub use delivery::email::{EmailConfig, EmailError, EmailSender, OutgoingEmail, ResendDelivery};
pub use listener::NotificationListener;
