//! Budget error types.

use thiserror::Error;

use moneta_shared::types::BudgetCategoryId;

use crate::error::ErrorClass;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Title or name is blank.
    #[error("Title cannot be blank")]
    BlankTitle,

    /// Expense recorded against a category that does not exist.
    #[error("Budget category not found: {0}")]
    CategoryNotFound(BudgetCategoryId),
}

impl BudgetError {
    /// Classifies the error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Input
    }
}
