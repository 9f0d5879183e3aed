//! Record store collaborator and repositories.
//!
//! This crate provides:
//! - The generic `RecordStore` contract and an in-memory implementation
//! - Repositories for income, obligations and budget records
//! - The Obligation Ledger's mutating operations (create, contribute, settle)

pub mod repositories;
pub mod store;

pub use repositories::{
    BudgetRepository, IncomeRepository, ObligationRepository, Repositories, RepositoryError,
};
pub use store::{Filter, InMemoryStore, Record, RecordStore, StoreError};
