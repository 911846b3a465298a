//! Repositories map typed models to documents.
//!
//! Each repository is a zero-sized struct whose methods take the store as
//! their first argument.

pub mod catalog_repo;
pub mod category_repo;
pub mod email_repo;
pub mod inquiry_repo;
pub mod notification_repo;
pub mod service_item_repo;
pub mod settings_repo;

pub use catalog_repo::CatalogRepo;
pub use category_repo::CategoryRepo;
pub use email_repo::EmailRepo;
pub use inquiry_repo::InquiryRepo;
pub use notification_repo::NotificationRepo;
pub use service_item_repo::ServiceItemRepo;
pub use settings_repo::SettingsRepo;

use serde::de::DeserializeOwned;

use crate::store::{Document, StoreError};

/// Decode a list of documents, failing on the first malformed one.
fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, StoreError> {
    docs.iter().map(Document::decode).collect()
}

/// Decode an optional document.
fn decode_opt<T: DeserializeOwned>(doc: Option<Document>) -> Result<Option<T>, StoreError> {
    doc.as_ref().map(Document::decode).transpose()
}
