//! HTTP surface of the Deal4Bank site: public landing reads and lead
//! intake, the provider webhook, and the admin console API with its live
//! alert socket.
//!
//! Library form so `tests/` can build the same router the binary serves.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notifications;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
