//! Installment schedule generation.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use moneta_shared::types::{InstallmentId, ObligationId};

use super::types::{Installment, InstallmentStatus};

/// Errors raised while building a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A due date falls outside the representable calendar.
    #[error("Due date for installment {sequence} is out of range")]
    DueDateOutOfRange {
        /// Sequence whose due date overflowed.
        sequence: u32,
    },
}

/// Generates installment plans.
pub struct InstallmentScheduler;

impl InstallmentScheduler {
    /// Due date of the installment at `sequence` (1-based).
    ///
    /// Always computed from the anchor date, never from the previous due date,
    /// so a day-of-month clamped in a short month is restored in later months
    /// (Jan 31 → Feb 28 → Mar 31).
    #[must_use]
    pub fn due_date(first_due_date: NaiveDate, sequence: u32) -> Option<NaiveDate> {
        let offset = sequence.checked_sub(1)?;
        first_due_date.checked_add_months(Months::new(offset))
    }

    /// Generates `count` pending installments of `amount`, due monthly from `first_due_date`.
    ///
    /// A `count` of zero or less yields an empty plan.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::DueDateOutOfRange` if a due date cannot be represented.
    pub fn generate(
        debt_id: ObligationId,
        count: i64,
        amount: Decimal,
        first_due_date: NaiveDate,
    ) -> Result<Vec<Installment>, ScheduleError> {
        if count <= 0 {
            return Ok(Vec::new());
        }
        let count = u32::try_from(count).map_err(|_| ScheduleError::DueDateOutOfRange {
            sequence: u32::MAX,
        })?;

        (1..=count)
            .map(|sequence| {
                let due_date = Self::due_date(first_due_date, sequence)
                    .ok_or(ScheduleError::DueDateOutOfRange { sequence })?;
                Ok(Installment {
                    id: InstallmentId::derive(debt_id, sequence),
                    debt_id,
                    sequence,
                    amount,
                    due_date,
                    status: InstallmentStatus::Pending,
                    paid_on: None,
                })
            })
            .collect()
    }

    /// Sum of all installment amounts.
    #[must_use]
    pub fn total(installments: &[Installment]) -> Decimal {
        installments.iter().map(|i| i.amount).sum()
    }

    /// Checks the plan invariant: contiguous sequences from 1, one debt, monthly due dates.
    #[must_use]
    pub fn is_well_formed(
        debt_id: ObligationId,
        first_due_date: NaiveDate,
        installments: &[Installment],
    ) -> bool {
        installments.iter().zip(1u32..).all(|(installment, expected)| {
            installment.debt_id == debt_id
                && installment.sequence == expected
                && Self::due_date(first_due_date, expected) == Some(installment.due_date)
        })
    }
}
