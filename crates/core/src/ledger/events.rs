//! Events emitted by ledger mutations.

use chrono::NaiveDate;
use serde::Serialize;

use moneta_shared::types::ObligationId;

/// A ledger event consumed by the notification/UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// The last pending installment of a debt was paid. Emitted once per debt.
    DebtSettled {
        /// Settled debt.
        debt_id: ObligationId,
        /// Date the final installment was paid.
        settled_on: NaiveDate,
    },
}
