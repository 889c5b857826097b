use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use std::marker::PhantomData;
use uuid::Uuid;

use super::{Collection, Document, StoreError};

/// Collection backed by a `(id, seq, created_at, doc JSONB)` table.
///
/// The table name comes from `Document::COLLECTION`, a compile-time constant,
/// so it is safe to format into SQL. Every value is bound as a parameter.
pub struct PgCollection<T> {
    pool: PgPool,
    _doc: PhantomData<fn() -> T>,
}

impl<T: Document> PgCollection<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _doc: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        T::COLLECTION
    }

    async fn fetch_docs(&self, sql: &str) -> Result<Vec<T>, StoreError> {
        let rows: Vec<(Json<T>,)> = sqlx::query_as(sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(doc,)| doc.0).collect())
    }
}

#[async_trait]
impl<T: Document> Collection<T> for PgCollection<T> {
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!("SELECT doc FROM {} ORDER BY seq", self.table());
        self.fetch_docs(&sql).await
    }

    async fn find_limit(&self, limit: usize) -> Result<Vec<T>, StoreError> {
        let sql = format!("SELECT doc FROM {} ORDER BY seq LIMIT $1", self.table());
        let rows: Vec<(Json<T>,)> = sqlx::query_as(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(doc,)| doc.0).collect())
    }

    async fn find_newest_first(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!(
            "SELECT doc FROM {} ORDER BY created_at DESC, seq DESC",
            self.table()
        );
        self.fetch_docs(&sql).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", self.table());
        let row: Option<(Json<T>,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(doc,)| doc.0))
    }

    async fn find_one(&self, field: &'static str, value: &str) -> Result<Option<T>, StoreError> {
        let sql = format!(
            "SELECT doc FROM {} WHERE doc ->> $1 = $2 ORDER BY seq LIMIT 1",
            self.table()
        );
        let row: Option<(Json<T>,)> = sqlx::query_as(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(doc,)| doc.0))
    }

    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table());
        let result = sqlx::query(&sql)
            .bind(doc.id())
            .bind(Json(doc))
            .execute(&self.pool)
            .await;

        match (result, T::UNIQUE_FIELD) {
            (Ok(_), _) => Ok(()),
            (Err(sqlx::Error::Database(db)), Some(field)) if db.is_unique_violation() => {
                Err(StoreError::Conflict(field))
            }
            (Err(e), _) => Err(e.into()),
        }
    }

    async fn replace(&self, doc: &T) -> Result<bool, StoreError> {
        let sql = format!("UPDATE {} SET doc = $2 WHERE id = $1", self.table());
        let result = sqlx::query(&sql)
            .bind(doc.id())
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn replace_all(&self, docs: &[T]) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("DELETE FROM {}", self.table()))
            .execute(&mut *tx)
            .await?;

        let insert = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table());
        for doc in docs {
            sqlx::query(&insert)
                .bind(doc.id())
                .bind(Json(doc))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(docs.len())
    }
}
