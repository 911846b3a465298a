//! Repository for the singleton documents in the `settings` collection.

use serde_json::Value;

use crate::collections::SETTINGS;
use crate::models::settings::{CompanySettings, GlobalSettings, COMPANY_ID, GLOBAL_ID};
use crate::store::{encode, Document, DocumentStore, StoreError};

/// Reads and replaces the company profile and global configuration.
pub struct SettingsRepo;

/// Decode a settings body as-is. Settings documents are exposed without
/// the `id`/`createdAt` metadata other models get.
fn decode_body<T: serde::de::DeserializeOwned>(doc: &Document) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(doc.body.clone())).map_err(|source| StoreError::Decode {
        collection: doc.collection.clone(),
        id: doc.id.clone(),
        source,
    })
}

impl SettingsRepo {
    /// The stored company profile, or `None` if it was never saved.
    pub async fn company(store: &dyn DocumentStore) -> Result<Option<CompanySettings>, StoreError> {
        store
            .get(SETTINGS, COMPANY_ID)
            .await?
            .as_ref()
            .map(decode_body)
            .transpose()
    }

    /// Replace the company profile.
    pub async fn save_company(
        store: &dyn DocumentStore,
        settings: &CompanySettings,
    ) -> Result<CompanySettings, StoreError> {
        let doc = store.set(SETTINGS, COMPANY_ID, encode(settings)?).await?;
        decode_body(&doc)
    }

    /// The global configuration, with defaults for anything unset.
    pub async fn global(store: &dyn DocumentStore) -> Result<GlobalSettings, StoreError> {
        match store.get(SETTINGS, GLOBAL_ID).await? {
            Some(doc) => decode_body(&doc),
            None => Ok(GlobalSettings::default()),
        }
    }

    /// Replace the global configuration.
    pub async fn save_global(
        store: &dyn DocumentStore,
        settings: &GlobalSettings,
    ) -> Result<GlobalSettings, StoreError> {
        let doc = store.set(SETTINGS, GLOBAL_ID, encode(settings)?).await?;
        decode_body(&doc)
    }
}
