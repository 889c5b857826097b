use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::{Collection, Document, StoreError};

struct Entry<T> {
    seq: u64,
    inserted_at: DateTime<Utc>,
    doc: T,
}

/// Process-local collection. Used when no database is configured and in tests.
pub struct MemoryCollection<T> {
    entries: RwLock<Vec<Entry<T>>>,
    next_seq: RwLock<u64>,
}

impl<T: Document> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_seq: RwLock::new(0),
        }
    }

    fn entry(&self, doc: T) -> Entry<T> {
        let mut seq = self.next_seq.write();
        *seq += 1;
        Entry {
            seq: *seq,
            inserted_at: Utc::now(),
            doc,
        }
    }
}

impl<T: Document> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> Collection<T> for MemoryCollection<T> {
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.entries.read().iter().map(|e| e.doc.clone()).collect())
    }

    async fn find_limit(&self, limit: usize) -> Result<Vec<T>, StoreError> {
        Ok(self
            .entries
            .read()
            .iter()
            .take(limit)
            .map(|e| e.doc.clone())
            .collect())
    }

    async fn find_newest_first(&self) -> Result<Vec<T>, StoreError> {
        let entries = self.entries.read();
        let mut ordered: Vec<&Entry<T>> = entries.iter().collect();
        ordered.sort_by(|a, b| {
            b.inserted_at
                .cmp(&a.inserted_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        Ok(ordered.into_iter().map(|e| e.doc.clone()).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        Ok(self
            .entries
            .read()
            .iter()
            .find(|e| e.doc.id() == id)
            .map(|e| e.doc.clone()))
    }

    async fn find_one(&self, field: &'static str, value: &str) -> Result<Option<T>, StoreError> {
        let entries = self.entries.read();
        for entry in entries.iter() {
            let json = serde_json::to_value(&entry.doc)?;
            if json.get(field).and_then(|v| v.as_str()) == Some(value) {
                return Ok(Some(entry.doc.clone()));
            }
        }
        Ok(None)
    }

    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        if let Some(field) = T::UNIQUE_FIELD {
            let value = serde_json::to_value(doc)?;
            let key = value.get(field);
            for entry in entries.iter() {
                if serde_json::to_value(&entry.doc)?.get(field) == key {
                    return Err(StoreError::Conflict(field));
                }
            }
        }
        let entry = self.entry(doc.clone());
        entries.push(entry);
        Ok(())
    }

    async fn replace(&self, doc: &T) -> Result<bool, StoreError> {
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|e| e.doc.id() == doc.id()) {
            Some(entry) => {
                entry.doc = doc.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.doc.id() != id);
        Ok(entries.len() != before)
    }

    async fn replace_all(&self, docs: &[T]) -> Result<usize, StoreError> {
        let fresh: Vec<Entry<T>> = docs.iter().map(|d| self.entry(d.clone())).collect();
        *self.entries.write() = fresh;
        Ok(docs.len())
    }
}
