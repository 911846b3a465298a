//! In-process [`DocumentStore`] backed by a `RwLock`ed map.
//!
//! Used by the test suites and by local development when no
//! `DATABASE_URL` is configured. Ordering follows the Postgres backend's
//! `jsonb` comparison so both backends return lists in the same order.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use super::{
    Body, ChangeFeed, ChangeKind, Direction, Document, DocumentChange, DocumentStore, ListQuery,
    NewDocument, OrderBy, StoreError,
};

/// Collection name → document id → document.
type Collections = HashMap<String, HashMap<String, Document>>;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    feed: ChangeFeed,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StoreError::Unavailable`]
    /// until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            Err(StoreError::Unavailable(
                "memory store switched off".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.ensure_available()
    }

    async fn create_batch(&self, docs: Vec<NewDocument>) -> Result<Vec<Document>, StoreError> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;

        for (i, doc) in docs.iter().enumerate() {
            let taken = collections
                .get(&doc.collection)
                .is_some_and(|c| c.contains_key(&doc.id));
            let repeated = docs[..i]
                .iter()
                .any(|d| d.collection == doc.collection && d.id == doc.id);
            if taken || repeated {
                return Err(StoreError::Duplicate {
                    collection: doc.collection.clone(),
                    id: doc.id.clone(),
                });
            }
        }

        let now = Utc::now();
        let created: Vec<Document> = docs
            .into_iter()
            .map(|doc| Document {
                collection: doc.collection,
                id: doc.id,
                body: doc.body,
                created_at: now,
                updated_at: now,
            })
            .collect();
        for doc in &created {
            collections
                .entry(doc.collection.clone())
                .or_default()
                .insert(doc.id.clone(), doc.clone());
        }
        drop(collections);

        for doc in &created {
            self.feed
                .publish(ChangeKind::Added, &doc.collection, &doc.id, Some(doc.clone()));
        }
        Ok(created)
    }

    async fn set(&self, collection: &str, id: &str, body: Body) -> Result<Document, StoreError> {
        self.ensure_available()?;
        let now = Utc::now();
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let (kind, doc) = match docs.get_mut(id) {
            Some(existing) => {
                existing.body = body;
                existing.updated_at = now;
                (ChangeKind::Modified, existing.clone())
            }
            None => {
                let doc = Document {
                    collection: collection.to_string(),
                    id: id.to_string(),
                    body,
                    created_at: now,
                    updated_at: now,
                };
                docs.insert(id.to_string(), doc.clone());
                (ChangeKind::Added, doc)
            }
        };
        drop(collections);

        self.feed.publish(kind, collection, id, Some(doc.clone()));
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.ensure_available()?;
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError> {
        self.ensure_available()?;
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|c| c.values().filter(|d| query.matches(d)).cloned().collect())
            .unwrap_or_default();
        drop(collections);

        docs.sort_by(|a, b| compare_documents(a, b, query.order.as_ref()));
        if let Some(limit) = query.limit {
            docs.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(docs)
    }

    async fn count(&self, collection: &str, query: &ListQuery) -> Result<u64, StoreError> {
        self.ensure_available()?;
        let collections = self.collections.read().await;
        let count = collections
            .get(collection)
            .map(|c| c.values().filter(|d| query.matches(d)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Body,
    ) -> Result<Option<Document>, StoreError> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;
        let Some(existing) = collections.get_mut(collection).and_then(|c| c.get_mut(id)) else {
            return Ok(None);
        };
        existing.body.extend(patch);
        existing.updated_at = Utc::now();
        let doc = existing.clone();
        drop(collections);

        self.feed
            .publish(ChangeKind::Modified, collection, id, Some(doc.clone()));
        Ok(Some(doc))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.ensure_available()?;
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|c| c.remove(id))
            .is_some();
        drop(collections);

        if removed {
            self.feed.publish(ChangeKind::Removed, collection, id, None);
        }
        Ok(removed)
    }

    fn subscribe(&self) -> broadcast::Receiver<DocumentChange> {
        self.feed.subscribe()
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Compare two documents the way the Postgres backend orders rows: by the
/// requested key, then creation time, then id.
fn compare_documents(a: &Document, b: &Document, order: Option<&OrderBy>) -> Ordering {
    let primary = match order {
        Some(OrderBy::Field(field, direction)) => {
            let ord = compare_optional(a.body.get(field), b.body.get(field));
            apply_direction(ord, *direction)
        }
        Some(OrderBy::CreatedAt(direction)) => {
            apply_direction(a.created_at.cmp(&b.created_at), *direction)
        }
        None => Ordering::Equal,
    };
    primary
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

fn apply_direction(ord: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

/// Missing values sort after present ones (Postgres `NULLS LAST` for ASC).
fn compare_optional(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_json(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `jsonb` ordering: null < string < number < boolean < array < object.
fn compare_json(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::String(_) => 1,
            Value::Number(_) => 2,
            Value::Bool(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y)
                .map(|(l, r)| compare_json(l, r))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        _ => rank(a).cmp(&rank(b)),
    }
}
