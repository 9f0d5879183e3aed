//! Budget categories, subscriptions and variable spending.
//!
//! This module implements:
//! - Planned vs used variable spending
//! - The fixed-expense bucket (subscriptions plus fixed categories)
//! - The committed/free balance reconciliation

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use service::{BudgetReconciler, Reconciliation};
pub use types::{
    BudgetCategory, Expense, NewBudgetCategory, NewExpense, NewSubscription, Subscription,
};
