//! Typed views of the documents in each collection, plus the input DTOs
//! the repositories accept.
//!
//! Models decode tolerantly: fields the admin UI may never have written
//! fall back to defaults instead of failing the whole read.

pub mod category;
pub mod email;
pub mod inquiry;
pub mod notification;
pub mod service_item;
pub mod settings;

fn default_true() -> bool {
    true
}
