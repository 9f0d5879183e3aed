//! Installment data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::{InstallmentId, ObligationId};

/// Payment state of an installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Not paid yet.
    Pending,
    /// Settled.
    Paid,
}

/// One scheduled payment of a debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Installment ID (derived from the debt ID and sequence).
    pub id: InstallmentId,
    /// Owning debt.
    pub debt_id: ObligationId,
    /// Position in the plan, starting at 1.
    pub sequence: u32,
    /// Amount due.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Payment state.
    pub status: InstallmentStatus,
    /// Date the installment was settled.
    pub paid_on: Option<NaiveDate>,
}

impl Installment {
    /// Whether the installment is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == InstallmentStatus::Pending
    }
}
