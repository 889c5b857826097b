//! Document storage.
//!
//! Every collection is a bag of JSON documents addressed by a UUID and kept
//! in insertion order. Insertion order matters: the simulation takes the first
//! `numberOfDrivers` drivers and cycles through them in that order.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Driver, Order, Route, SimulationRecord, User};

pub use memory::MemoryCollection;
pub use postgres::PgCollection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate value for unique field {0}")]
    Conflict(&'static str),
}

pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Collection (and table) name. Must be a plain identifier.
    const COLLECTION: &'static str;

    /// Top-level string field no two documents may share.
    const UNIQUE_FIELD: Option<&'static str> = None;

    fn id(&self) -> Uuid;
}

#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    async fn find_limit(&self, limit: usize) -> Result<Vec<T>, StoreError>;

    /// All documents, most recently inserted first.
    async fn find_newest_first(&self) -> Result<Vec<T>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError>;

    /// First document whose top-level string `field` equals `value`.
    async fn find_one(&self, field: &'static str, value: &str) -> Result<Option<T>, StoreError>;

    /// Fails with `StoreError::Conflict` when `doc` repeats the value of
    /// `T::UNIQUE_FIELD`.
    async fn insert(&self, doc: &T) -> Result<(), StoreError>;

    /// Returns false when no document with that id exists.
    async fn replace(&self, doc: &T) -> Result<bool, StoreError>;

    /// Returns false when no document with that id exists.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Drops every document and inserts `docs` in their place.
    async fn replace_all(&self, docs: &[T]) -> Result<usize, StoreError>;
}

/// Handles to every collection the service reads or writes.
#[derive(Clone)]
pub struct Store {
    pub drivers: Arc<dyn Collection<Driver>>,
    pub routes: Arc<dyn Collection<Route>>,
    pub orders: Arc<dyn Collection<Order>>,
    pub simulations: Arc<dyn Collection<SimulationRecord>>,
    pub users: Arc<dyn Collection<User>>,
}

impl Store {
    pub fn in_memory() -> Self {
        Self {
            drivers: Arc::new(MemoryCollection::<Driver>::new()),
            routes: Arc::new(MemoryCollection::<Route>::new()),
            orders: Arc::new(MemoryCollection::<Order>::new()),
            simulations: Arc::new(MemoryCollection::<SimulationRecord>::new()),
            users: Arc::new(MemoryCollection::<User>::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            drivers: Arc::new(PgCollection::<Driver>::new(pool.clone())),
            routes: Arc::new(PgCollection::<Route>::new(pool.clone())),
            orders: Arc::new(PgCollection::<Order>::new(pool.clone())),
            simulations: Arc::new(PgCollection::<SimulationRecord>::new(pool.clone())),
            users: Arc::new(PgCollection::<User>::new(pool)),
        }
    }
}

/// Table names and unique fields for schema bootstrap.
pub const COLLECTIONS: [(&str, Option<&str>); 5] = [
    (Driver::COLLECTION, Driver::UNIQUE_FIELD),
    (Route::COLLECTION, Route::UNIQUE_FIELD),
    (Order::COLLECTION, Order::UNIQUE_FIELD),
    (SimulationRecord::COLLECTION, SimulationRecord::UNIQUE_FIELD),
    (User::COLLECTION, User::UNIQUE_FIELD),
];
