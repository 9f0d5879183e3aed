//! Income error types.

use moneta_shared::types::IncomeSourceId;
use thiserror::Error;

/// Income-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncomeError {
    /// Frequency is outside the supported enumeration.
    #[error("Unknown frequency '{value}' on income source {source_id}")]
    UnknownFrequency {
        /// Offending source.
        source_id: IncomeSourceId,
        /// Raw frequency value.
        value: String,
    },

    /// Amount cannot be negative.
    #[error("Income amount cannot be negative")]
    NegativeAmount,

    /// Name cannot be blank.
    #[error("Income source name cannot be blank")]
    BlankName,
}

impl IncomeError {
    /// Classifies the error.
    #[must_use]
    pub const fn class(&self) -> crate::error::ErrorClass {
        crate::error::ErrorClass::Input
    }
}
