//! Generic record store contract.
//!
//! Persistence is an external collaborator: anything able to list, insert,
//! replace and delete whole records can back the repositories.

pub mod memory;
mod records;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryStore;

/// Errors raised by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("{collection} record not found: {id}")]
    NotFound {
        /// Collection name.
        collection: &'static str,
        /// Record id.
        id: String,
    },

    /// A record with this id already exists.
    #[error("{collection} record already exists: {id}")]
    Conflict {
        /// Collection name.
        collection: &'static str,
        /// Record id.
        id: String,
    },

    /// The store could not be reached.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

/// A storable entity.
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type.
    type Id: Copy + Eq + fmt::Display + Send + Sync + 'static;

    /// Collection name, used in errors and logs.
    const COLLECTION: &'static str;

    /// The record's id.
    fn id(&self) -> Self::Id;
}

/// Which records to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<Id> {
    /// Every record, in insertion order.
    All,
    /// Only records with these ids, in insertion order.
    Ids(Vec<Id>),
}

impl<Id: PartialEq> Filter<Id> {
    /// Whether `id` passes the filter.
    pub fn matches(&self, id: &Id) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) => ids.contains(id),
        }
    }
}

/// Generic CRUD over one record type.
///
/// Every call may fail with a [`StoreError`]. A failed call must leave the
/// stored state untouched.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Lists records passing `filter`.
    async fn list(&self, filter: &Filter<T::Id>) -> Result<Vec<T>, StoreError>;

    /// Inserts a new record.
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Replaces the record with id `id`.
    async fn update(&self, id: T::Id, record: T) -> Result<T, StoreError>;

    /// Deletes the record with id `id`.
    async fn delete(&self, id: T::Id) -> Result<(), StoreError>;

    /// Fetches one record.
    async fn get(&self, id: T::Id) -> Result<T, StoreError> {
        self.list(&Filter::Ids(vec![id]))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound {
                collection: T::COLLECTION,
                id: id.to_string(),
            })
    }
}
