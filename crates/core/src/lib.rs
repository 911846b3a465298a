//! Deal4Bank domain core.
//!
//! Pure domain types, constants and validation shared by the store, the
//! event services and the HTTP API. Nothing in this crate performs I/O.

pub mod catalog;
pub mod error;
pub mod inquiry;
pub mod landing;
pub mod mailbox;
pub mod notification;
pub mod site;
pub mod types;
pub mod validation;
