//! Projection engine.
//!
//! Compounds an initial amount plus a recurring monthly contribution against a
//! monthly-equivalent rate. The combined monthly rate is the SUM of the
//! monthly equivalents of the reference rate and the asset return (additive
//! approximation, not compounded together).

use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

use moneta_shared::config::NegativeInputPolicy;
use moneta_shared::types::round_money;

use super::error::ProjectionError;
use super::types::{ProjectionParams, ProjectionPoint, ProjectionResult};

/// Engine for running projections.
pub struct ProjectionEngine;

impl ProjectionEngine {
    /// Converts an annual rate to its monthly equivalent: `(1 + annual)^(1/12) - 1`.
    ///
    /// # Errors
    ///
    /// Returns `RateBelowTotalLoss` for rates at or below -100%.
    pub fn monthly_equivalent_rate(annual_rate: Decimal) -> Result<Decimal, ProjectionError> {
        if annual_rate <= Decimal::NEGATIVE_ONE {
            return Err(ProjectionError::RateBelowTotalLoss(annual_rate));
        }
        if annual_rate.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let exponent = Decimal::ONE / Decimal::from(12);
        (Decimal::ONE + annual_rate)
            .checked_powd(exponent)
            .map(|factor| factor - Decimal::ONE)
            .ok_or(ProjectionError::Overflow(0))
    }

    /// Combined monthly rate for a reference rate plus an optional asset return.
    ///
    /// # Errors
    ///
    /// Propagates `monthly_equivalent_rate` errors.
    pub fn combined_monthly_rate(
        annual_rate: Decimal,
        asset_annual_return: Option<Decimal>,
    ) -> Result<Decimal, ProjectionError> {
        let reference = Self::monthly_equivalent_rate(annual_rate)?;
        let asset = match asset_annual_return {
            Some(rate) => Self::monthly_equivalent_rate(rate)?,
            None => Decimal::ZERO,
        };
        Ok(reference + asset)
    }

    fn check_policy(
        params: &ProjectionParams,
        policy: NegativeInputPolicy,
    ) -> Result<(), ProjectionError> {
        if policy == NegativeInputPolicy::Accept {
            return Ok(());
        }
        if params.monthly_amount < Decimal::ZERO {
            return Err(ProjectionError::NegativeContribution(params.monthly_amount));
        }
        for rate in std::iter::once(params.annual_rate).chain(params.asset_annual_return) {
            if rate < Decimal::ZERO {
                return Err(ProjectionError::NegativeRate(rate));
            }
        }
        Ok(())
    }

    /// Validates the requested month count; non-positive counts become 0.
    ///
    /// # Errors
    ///
    /// Returns `HorizonTooLong` above `max_months`.
    pub fn check_horizon(months: i64, max_months: u32) -> Result<u32, ProjectionError> {
        match u32::try_from(months.max(0)) {
            Ok(months) if months <= max_months => Ok(months),
            _ => Err(ProjectionError::HorizonTooLong {
                requested: months,
                max: max_months,
            }),
        }
    }

    /// Applies one month: contribution first, then growth.
    fn step(
        balance: Decimal,
        monthly_amount: Decimal,
        growth_factor: Decimal,
        month: u32,
    ) -> Result<Decimal, ProjectionError> {
        balance
            .checked_add(monthly_amount)
            .and_then(|b| b.checked_mul(growth_factor))
            .ok_or(ProjectionError::Overflow(month))
    }

    /// Runs a projection.
    ///
    /// Internal arithmetic keeps full precision; only the series values are
    /// rounded to 2 decimal places.
    ///
    /// # Errors
    ///
    /// Returns `HorizonTooLong` when more than `max_months` are requested.
    /// Also fails for inputs rejected by `policy`, rates at or below -100%,
    /// or arithmetic overflow.
    pub fn compute(
        params: &ProjectionParams,
        policy: NegativeInputPolicy,
        max_months: u32,
    ) -> Result<ProjectionResult, ProjectionError> {
        let months = Self::check_horizon(params.months, max_months)?;
        Self::check_policy(params, policy)?;
        let monthly_return =
            Self::combined_monthly_rate(params.annual_rate, params.asset_annual_return)?;

        let growth_factor = Decimal::ONE + monthly_return;
        let mut balance = params.initial_amount;
        let mut series = Vec::with_capacity(months as usize);

        for month in 1..=months {
            balance = Self::step(balance, params.monthly_amount, growth_factor, month)?;
            series.push(ProjectionPoint {
                month,
                value: round_money(balance),
            });
        }

        debug!(months, %monthly_return, "Projection computed");

        Ok(ProjectionResult {
            series,
            monthly_return,
            cached: false,
        })
    }

    /// Number of months until the balance reaches `target`, searching at most `horizon` months.
    ///
    /// Returns `Some(0)` when the target is already met and `None` when it is
    /// not reached within the horizon.
    #[must_use]
    pub fn months_to_target(
        initial_amount: Decimal,
        monthly_amount: Decimal,
        target: Decimal,
        monthly_return: Decimal,
        horizon: u32,
    ) -> Option<u32> {
        if initial_amount >= target {
            return Some(0);
        }
        if monthly_amount <= Decimal::ZERO && monthly_return <= Decimal::ZERO {
            return None;
        }
        let growth_factor = Decimal::ONE + monthly_return;
        let mut balance = initial_amount;
        for month in 1..=horizon {
            balance = Self::step(balance, monthly_amount, growth_factor, month).ok()?;
            if balance >= target {
                return Some(month);
            }
        }
        None
    }
}
