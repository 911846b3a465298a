//! Document store abstraction.
//!
//! A collection holds JSON-object documents addressed by an opaque string
//! id. Writes are last-write-wins; there are no cross-document constraints
//! and nothing cascades. Every committed write is published on the store's
//! change feed so listeners can react to new records.
//!
//! Two backends implement [`DocumentStore`]:
//! - [`postgres::PgDocumentStore`] persists to a single JSONB table.
//! - [`memory::MemoryStore`] keeps everything in process (tests, local dev).

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use deal4bank_core::types::{DocId, Timestamp};

/// A JSON object body.
pub type Body = Map<String, Value>;

/// Store handle shared across the application.
pub type SharedStore = Arc<dyn DocumentStore>;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The Postgres backend failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be decoded into the requested model.
    #[error("Malformed document {collection}/{id}: {source}")]
    Decode {
        collection: String,
        id: DocId,
        source: serde_json::Error,
    },

    /// A model could not be encoded as a JSON object.
    #[error("Failed to encode document: {0}")]
    Encode(String),

    /// A batch tried to create a document whose id is already taken.
    #[error("Document {collection}/{id} already exists")]
    Duplicate { collection: String, id: DocId },

    /// The backend refused the operation (connection lost, shut down).
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A stored document with its store-managed metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub collection: String,
    pub id: DocId,
    pub body: Body,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    /// Decode into a model. The document id and creation time are exposed
    /// to the model as `id` and `createdAt`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut body = self.body.clone();
        body.insert("id".to_string(), Value::String(self.id.clone()));
        body.insert(
            "createdAt".to_string(),
            serde_json::to_value(self.created_at).unwrap_or(Value::Null),
        );
        serde_json::from_value(Value::Object(body)).map_err(|source| StoreError::Decode {
            collection: self.collection.clone(),
            id: self.id.clone(),
            source,
        })
    }
}

/// A document to be created, with its id assigned up front so related
/// documents in the same batch can reference it.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub collection: String,
    pub id: DocId,
    pub body: Body,
}

impl NewDocument {
    pub fn new(collection: impl Into<String>, body: Body) -> Self {
        Self {
            collection: collection.into(),
            id: new_doc_id(),
            body,
        }
    }
}

/// Generate a new time-ordered document id.
pub fn new_doc_id() -> DocId {
    uuid::Uuid::now_v7().simple().to_string()
}

/// Unwrap a `json!({...})` literal into a [`Body`].
pub fn body(value: Value) -> Body {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Encode a serializable model as a [`Body`].
pub fn encode<T: Serialize>(value: &T) -> Result<Body, StoreError> {
    match serde_json::to_value(value).map_err(|e| StoreError::Encode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Encode(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderBy {
    /// Order by a top-level body field. Documents missing the field sort last
    /// when ascending.
    Field(String, Direction),
    /// Order by creation time.
    CreatedAt(Direction),
}

/// Filter, ordering and paging for [`DocumentStore::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Top-level body fields that must equal the given values.
    pub filters: Vec<(String, Value)>,
    pub order: Option<OrderBy>,
    pub limit: Option<i64>,
    pub created_after: Option<Timestamp>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(OrderBy::Field(field.into(), direction));
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = Some(OrderBy::CreatedAt(Direction::Desc));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn created_after(mut self, at: Timestamp) -> Self {
        self.created_after = Some(at);
        self
    }

    /// Whether `doc` passes the filters and the creation cutoff.
    pub fn matches(&self, doc: &Document) -> bool {
        let fields_match = self
            .filters
            .iter()
            .all(|(field, value)| doc.body.get(field) == Some(value));
        let recent_enough = self.created_after.is_none_or(|after| doc.created_at > after);
        fields_match && recent_enough
    }
}

// ---------------------------------------------------------------------------
// Change feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// A committed write, as seen by change-feed subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentChange {
    pub kind: ChangeKind,
    pub collection: String,
    pub id: DocId,
    /// The document after the write; `None` for removals.
    pub document: Option<Document>,
}

/// Default buffer capacity for the change feed.
const CHANGE_FEED_CAPACITY: usize = 1024;

/// Fan-out of [`DocumentChange`]s to any number of subscribers.
pub struct ChangeFeed {
    sender: broadcast::Sender<DocumentChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change. Dropped silently when nobody is subscribed.
    pub fn publish(&self, kind: ChangeKind, collection: &str, id: &str, document: Option<Document>) {
        let _ = self.sender.send(DocumentChange {
            kind,
            collection: collection.to_string(),
            id: id.to_string(),
            document,
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DocumentChange> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(CHANGE_FEED_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

/// Create/read/update/delete over collections of JSON documents, plus a
/// change feed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend_tag(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Create a document with a store-assigned id.
    async fn create(&self, collection: &str, body: Body) -> Result<Document, StoreError> {
        let mut created = self
            .create_batch(vec![NewDocument::new(collection, body)])
            .await?;
        created
            .pop()
            .ok_or_else(|| StoreError::Unavailable("batch returned no document".to_string()))
    }

    /// Create several documents atomically: either all are written or none.
    async fn create_batch(&self, docs: Vec<NewDocument>) -> Result<Vec<Document>, StoreError>;

    /// Create or fully replace the document at `collection/id`.
    async fn set(&self, collection: &str, id: &str, body: Body) -> Result<Document, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError>;

    /// Count documents matching the query's filters and cutoff.
    async fn count(&self, collection: &str, query: &ListQuery) -> Result<u64, StoreError>;

    /// Merge `patch` into the document's top-level fields.
    ///
    /// Returns `None` if the document does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Body,
    ) -> Result<Option<Document>, StoreError>;

    /// Returns `true` if a document was deleted.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Subscribe to every committed write.
    fn subscribe(&self) -> broadcast::Receiver<DocumentChange>;
}
