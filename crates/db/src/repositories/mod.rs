//! Repository abstractions for data access.
//!
//! Repositories validate input through the core domain types and hide the
//! record store behind typed operations.

pub mod budget;
pub mod error;
pub mod income;
pub mod obligation;

use std::sync::Arc;

use moneta_core::budget::{BudgetCategory, Expense, Subscription};
use moneta_core::income::IncomeSource;
use moneta_core::ledger::Obligation;

pub use budget::BudgetRepository;
pub use error::RepositoryError;
pub use income::{CreateIncomeSourceInput, IncomeRepository, UpdateIncomeSourceInput};
pub use obligation::ObligationRepository;

use crate::store::InMemoryStore;

/// Every repository, sharing one set of stores.
#[derive(Clone)]
pub struct Repositories {
    /// Income sources.
    pub income: Arc<IncomeRepository>,
    /// Goals, debts and investments.
    pub obligations: Arc<ObligationRepository>,
    /// Budget categories, subscriptions and expenses.
    pub budget: Arc<BudgetRepository>,
}

impl Repositories {
    /// Repositories backed by empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        let income: Arc<InMemoryStore<IncomeSource>> = Arc::new(InMemoryStore::new());
        let obligations: Arc<InMemoryStore<Obligation>> = Arc::new(InMemoryStore::new());
        let categories: Arc<InMemoryStore<BudgetCategory>> = Arc::new(InMemoryStore::new());
        let subscriptions: Arc<InMemoryStore<Subscription>> = Arc::new(InMemoryStore::new());
        let expenses: Arc<InMemoryStore<Expense>> = Arc::new(InMemoryStore::new());
        Self {
            income: Arc::new(IncomeRepository::new(income)),
            obligations: Arc::new(ObligationRepository::new(obligations)),
            budget: Arc::new(BudgetRepository::new(categories, subscriptions, expenses)),
        }
    }
}
