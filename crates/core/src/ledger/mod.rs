//! Obligation ledger: goals, debts and investments.
//!
//! This module implements:
//! - The obligation sum type and its per-kind data
//! - Progress, pace and months-to-target metrics
//! - Aggregate monthly outflows
//! - Debt settlement with its one-time settled event

pub mod error;
pub mod events;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use events::LedgerEvent;
pub use service::{LedgerService, ObligationOutflows, ObligationSummary};
pub use types::{
    Debt, Goal, Investment, NewDebt, NewGoal, NewInvestment, Obligation, ObligationHeader,
    ObligationKind, ProjectionSettings, Settlement,
};
