//! In-memory record store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Filter, Record, RecordStore, StoreError};

/// Record store backed by a vector, preserving insertion order.
pub struct InMemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T> InMemoryStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryStore<T> {
    /// Creates a store pre-filled with `records`.
    #[must_use]
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn not_found(id: T::Id) -> StoreError {
        StoreError::NotFound {
            collection: T::COLLECTION,
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    async fn list(&self, filter: &Filter<T::Id>) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(&r.id()))
            .cloned()
            .collect())
    }

    async fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let id = record.id();
        if records.iter().any(|r| r.id() == id) {
            return Err(StoreError::Conflict {
                collection: T::COLLECTION,
                id: id.to_string(),
            });
        }
        records.push(record.clone());
        debug!(collection = T::COLLECTION, %id, "Record inserted");
        Ok(record)
    }

    async fn update(&self, id: T::Id, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = record.clone();
        debug!(collection = T::COLLECTION, %id, "Record updated");
        Ok(record)
    }

    async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        records.remove(index);
        debug!(collection = T::COLLECTION, %id, "Record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneta_core::income::{Frequency, IncomeSource};
    use rust_decimal_macros::dec;

    fn source(name: &str) -> IncomeSource {
        IncomeSource::new(name, dec!(1000), Frequency::Monthly)
    }

    #[tokio::test]
    async fn test_insert_and_list_preserve_order() {
        let store = InMemoryStore::<IncomeSource>::new();
        let a = store.insert(source("A")).await.unwrap();
        let b = store.insert(source("B")).await.unwrap();

        let all = store.list(&Filter::All).await.unwrap();
        assert_eq!(all, vec![a.clone(), b.clone()]);

        let only_b = store.list(&Filter::Ids(vec![b.id])).await.unwrap();
        assert_eq!(only_b, vec![b]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = InMemoryStore::<IncomeSource>::new();
        let a = store.insert(source("A")).await.unwrap();
        let err = store.insert(a.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { collection: "income_sources", .. }));
        assert_eq!(store.list(&Filter::All).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = InMemoryStore::with_records(vec![source("A")]);
        let mut a = store.list(&Filter::All).await.unwrap().remove(0);
        a.amount = dec!(2000);

        store.update(a.id, a.clone()).await.unwrap();
        assert_eq!(store.get(a.id).await.unwrap().amount, dec!(2000));

        store.delete(a.id).await.unwrap();
        assert!(matches!(
            store.get(a.id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(a.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
