//! Projection error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::ErrorClass;

/// Projection-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Negative monthly contribution under the reject policy.
    #[error("Monthly contribution cannot be negative: {0}")]
    NegativeContribution(Decimal),

    /// Negative rate under the reject policy.
    #[error("Annual rate cannot be negative: {0}")]
    NegativeRate(Decimal),

    /// Annual rate of -100% or less has no monthly equivalent.
    #[error("Annual rate must be greater than -1, got {0}")]
    RateBelowTotalLoss(Decimal),

    /// More months requested than the configured horizon allows.
    #[error("Projection of {requested} months exceeds the maximum of {max}")]
    HorizonTooLong {
        /// Months requested.
        requested: i64,
        /// Configured maximum.
        max: u32,
    },

    /// Balance exceeded the representable range.
    #[error("Projection overflowed at month {0}")]
    Overflow(u32),
}

impl ProjectionError {
    /// Classifies the error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Overflow(_) => ErrorClass::Computation,
            _ => ErrorClass::Input,
        }
    }
}
