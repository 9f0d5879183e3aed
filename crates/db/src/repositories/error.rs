//! Repository error type.

use moneta_core::ErrorClass;
use moneta_core::budget::BudgetError;
use moneta_core::income::IncomeError;
use moneta_core::ledger::LedgerError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by repositories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Income validation failure.
    #[error(transparent)]
    Income(#[from] IncomeError),

    /// Ledger rule violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Budget validation failure.
    #[error(transparent)]
    Budget(#[from] BudgetError),
}

impl RepositoryError {
    /// Classifies the error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Store(StoreError::Unavailable(_)) => ErrorClass::PartialData,
            Self::Store(_) => ErrorClass::Input,
            Self::Income(e) => e.class(),
            Self::Ledger(e) => e.class(),
            Self::Budget(e) => e.class(),
        }
    }
}
