//! Ledger error types.

use moneta_shared::types::{InstallmentId, ObligationId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::ErrorClass;
use crate::installment::ScheduleError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Input Errors ==========
    /// Debts need at least one installment.
    #[error("Installment count must be positive, got {0}")]
    InvalidInstallmentCount(i64),

    /// Installment amount must be positive.
    #[error("Installment amount must be positive, got {0}")]
    InvalidInstallmentAmount(Decimal),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Title cannot be blank.
    #[error("Obligation title cannot be blank")]
    BlankTitle,

    /// Contributions are recorded on goals and investments only.
    #[error("Obligation {0} is a debt; use installment settlement instead")]
    ContributionToDebt(ObligationId),

    /// Operation only applies to debts.
    #[error("Obligation {0} is not a debt")]
    NotADebt(ObligationId),

    /// Schedule could not be built.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    // ========== Atomicity Violations ==========
    /// The installment does not belong to the debt.
    #[error("Installment {installment_id} does not belong to debt {debt_id}")]
    InstallmentNotOwned {
        /// Debt the caller targeted.
        debt_id: ObligationId,
        /// Installment the caller tried to settle.
        installment_id: InstallmentId,
    },

    /// Installment set is inconsistent with the declared count.
    #[error("Debt declares {expected} installments but {actual} were generated")]
    InstallmentSetMismatch {
        /// Declared installment count.
        expected: u32,
        /// Installments actually present.
        actual: usize,
    },

    // ========== State Errors ==========
    /// Installment was already paid.
    #[error("Installment {0} is already paid")]
    InstallmentAlreadyPaid(InstallmentId),

    /// Debt is fully settled.
    #[error("Debt {0} is already settled")]
    DebtAlreadySettled(ObligationId),
}

impl LedgerError {
    /// Classifies the error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InstallmentNotOwned { .. } | Self::InstallmentSetMismatch { .. } => {
                ErrorClass::AtomicityViolation
            }
            Self::Schedule(_) => ErrorClass::Computation,
            _ => ErrorClass::Input,
        }
    }
}
