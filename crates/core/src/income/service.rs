//! Income aggregation service.

use rust_decimal::Decimal;
use tracing::warn;

use moneta_shared::config::UnknownFrequencyPolicy;

use super::error::IncomeError;
use super::types::{Frequency, IncomeSource};

/// Aggregates income sources into monthly figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomeAggregator {
    policy: UnknownFrequencyPolicy,
}

impl IncomeAggregator {
    /// Creates an aggregator with the given unknown-frequency policy.
    #[must_use]
    pub const fn new(policy: UnknownFrequencyPolicy) -> Self {
        Self { policy }
    }

    /// Sums each source's monthly-equivalent amount.
    ///
    /// Returns zero for an empty list. Sources with an unknown frequency are
    /// excluded under [`UnknownFrequencyPolicy::Skip`] and abort the sum under
    /// [`UnknownFrequencyPolicy::Throw`].
    ///
    /// # Errors
    ///
    /// Returns `IncomeError::UnknownFrequency` when the policy is `Throw`.
    pub fn total_monthly_income(&self, sources: &[IncomeSource]) -> Result<Decimal, IncomeError> {
        let mut total = Decimal::ZERO;

        for source in sources {
            match source.parsed_frequency() {
                Ok(frequency) => total += frequency.monthly_equivalent(source.amount),
                Err(_) => {
                    let error = IncomeError::UnknownFrequency {
                        source_id: source.id,
                        value: source.frequency.clone(),
                    };
                    match self.policy {
                        UnknownFrequencyPolicy::Throw => return Err(error),
                        UnknownFrequencyPolicy::Skip => {
                            warn!(
                                source_id = %source.id,
                                frequency = %source.frequency,
                                "Skipping income source with unknown frequency"
                            );
                        }
                    }
                }
            }
        }

        Ok(total)
    }

    /// Projected income over `months` months (`total * months`).
    ///
    /// # Errors
    ///
    /// Propagates `total_monthly_income` errors.
    pub fn monthly_projection(
        &self,
        sources: &[IncomeSource],
        months: u32,
    ) -> Result<Decimal, IncomeError> {
        Ok(self.total_monthly_income(sources)? * Decimal::from(months))
    }

    /// Projected income over the next 12 months.
    ///
    /// # Errors
    ///
    /// Propagates `total_monthly_income` errors.
    pub fn annual_projection(&self, sources: &[IncomeSource]) -> Result<Decimal, IncomeError> {
        self.monthly_projection(sources, 12)
    }

    /// Validates a source before it is stored.
    ///
    /// # Errors
    ///
    /// Returns an error for blank names, negative amounts, or unknown frequencies.
    pub fn validate(source: &IncomeSource) -> Result<Frequency, IncomeError> {
        if source.name.trim().is_empty() {
            return Err(IncomeError::BlankName);
        }
        if source.amount < Decimal::ZERO {
            return Err(IncomeError::NegativeAmount);
        }
        source
            .parsed_frequency()
            .map_err(|_| IncomeError::UnknownFrequency {
                source_id: source.id,
                value: source.frequency.clone(),
            })
    }
}
