//! Postgres [`DocumentStore`]: one `documents` table with a JSONB body.
//!
//! Filters use `body @> $1` so they hit the GIN index; ordering by a body
//! field uses `jsonb` comparison on `body -> field`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use tokio::sync::broadcast;
use deal4bank_core::types::Timestamp;

use super::{
    Body, ChangeFeed, ChangeKind, Direction, Document, DocumentChange, DocumentStore, ListQuery,
    NewDocument, OrderBy, StoreError,
};
use crate::DbPool;

/// Column list for `documents` queries.
const COLUMNS: &str = "collection, id, body, created_at, updated_at";

/// Postgres error code for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, FromRow)]
struct DocumentRow {
    collection: String,
    id: String,
    body: Json<Body>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            collection: row.collection,
            id: row.id,
            body: row.body.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgDocumentStore {
    pool: DbPool,
    feed: ChangeFeed,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::default(),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Append `WHERE` clauses for the query's filters and creation cutoff.
fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, collection: &str, query: &ListQuery) {
    builder.push(" WHERE collection = ");
    builder.push_bind(collection.to_string());

    if !query.filters.is_empty() {
        let containment: Body = query
            .filters
            .iter()
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        builder.push(" AND body @> ");
        builder.push_bind(Json(Value::Object(containment)));
    }

    if let Some(after) = query.created_after {
        builder.push(" AND created_at > ");
        builder.push_bind(after);
    }
}

fn sql_direction(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "ASC NULLS LAST",
        Direction::Desc => "DESC NULLS FIRST",
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_batch(&self, docs: Vec<NewDocument>) -> Result<Vec<Document>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(docs.len());

        let query = format!(
            "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        for doc in docs {
            let row = sqlx::query_as::<_, DocumentRow>(&query)
                .bind(&doc.collection)
                .bind(&doc.id)
                .bind(Json(&doc.body))
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        StoreError::Duplicate {
                            collection: doc.collection.clone(),
                            id: doc.id.clone(),
                        }
                    } else {
                        StoreError::Database(e)
                    }
                })?;
            created.push(Document::from(row));
        }

        tx.commit().await?;

        for doc in &created {
            self.feed
                .publish(ChangeKind::Added, &doc.collection, &doc.id, Some(doc.clone()));
        }
        Ok(created)
    }

    async fn set(&self, collection: &str, id: &str, body: Body) -> Result<Document, StoreError> {
        // `xmax = 0` only holds for freshly inserted rows.
        let query = format!(
            "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE \
             SET body = EXCLUDED.body, updated_at = NOW() \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let row = sqlx::query(&query)
            .bind(collection)
            .bind(id)
            .bind(Json(&body))
            .fetch_one(&self.pool)
            .await?;
        let inserted: bool = sqlx::Row::try_get(&row, "inserted")?;
        let doc = Document::from(DocumentRow::from_row(&row)?);

        let kind = if inserted {
            ChangeKind::Added
        } else {
            ChangeKind::Modified
        };
        self.feed.publish(kind, collection, id, Some(doc.clone()));
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Document::from))
    }

    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM documents"));
        push_conditions(&mut builder, collection, query);

        builder.push(" ORDER BY ");
        match &query.order {
            Some(OrderBy::Field(field, direction)) => {
                builder.push("body -> ");
                builder.push_bind(field.clone());
                builder.push(" ");
                builder.push(sql_direction(*direction));
                builder.push(", ");
            }
            Some(OrderBy::CreatedAt(direction)) => {
                builder.push("created_at ");
                builder.push(sql_direction(*direction));
                builder.push(", ");
            }
            None => {}
        }
        builder.push("created_at ASC, id ASC");

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit.max(0));
        }

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn count(&self, collection: &str, query: &ListQuery) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents");
        push_conditions(&mut builder, collection, query);
        let (count,): (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Body,
    ) -> Result<Option<Document>, StoreError> {
        let query = format!(
            "UPDATE documents SET body = body || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(id)
            .bind(Json(&patch))
            .fetch_optional(&self.pool)
            .await?;
        let doc = row.map(Document::from);

        if let Some(doc) = &doc {
            self.feed
                .publish(ChangeKind::Modified, collection, id, Some(doc.clone()));
        }
        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        let removed = result.rows_affected() > 0;

        if removed {
            self.feed.publish(ChangeKind::Removed, collection, id, None);
        }
        Ok(removed)
    }

    fn subscribe(&self) -> broadcast::Receiver<DocumentChange> {
        self.feed.subscribe()
    }
}
