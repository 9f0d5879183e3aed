//! Projection data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters for a projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Balance at month 0.
    pub initial_amount: Decimal,
    /// Contribution added at the start of every month.
    pub monthly_amount: Decimal,
    /// Number of months to project. Zero or less yields an empty series.
    pub months: i64,
    /// Reference annual rate (e.g. 0.12 for 12%).
    pub annual_rate: Decimal,
    /// Optional annual return of the asset, added on top of the reference rate.
    pub asset_annual_return: Option<Decimal>,
}

/// Balance at the end of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Month number, starting at 1.
    pub month: u32,
    /// Post-growth balance, rounded to 2 decimal places.
    pub value: Decimal,
}

/// Result of a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// One point per month.
    pub series: Vec<ProjectionPoint>,
    /// Combined monthly-equivalent rate applied each month.
    pub monthly_return: Decimal,
    /// Whether this result was returned from cache.
    pub cached: bool,
}

impl ProjectionResult {
    /// Final projected balance, if any month was projected.
    #[must_use]
    pub fn final_value(&self) -> Option<Decimal> {
        self.series.last().map(|p| p.value)
    }
}
