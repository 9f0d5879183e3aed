//! Market rates consumed by investment projections.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use moneta_shared::config::MarketConfig;

/// Rates applied to investment projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketRates {
    /// Reference annual rate.
    pub reference_annual_rate: Decimal,
    /// Optional annual return of the asset, on top of the reference rate.
    pub asset_annual_return: Option<Decimal>,
}

impl From<&MarketConfig> for MarketRates {
    fn from(config: &MarketConfig) -> Self {
        Self {
            reference_annual_rate: config.reference_annual_rate,
            asset_annual_return: config.asset_annual_return,
        }
    }
}

/// Market rates could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Market rates unavailable: {0}")]
pub struct MarketRateError(pub String);

/// Source of market rates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketRateProvider: Send + Sync {
    /// Resolves the current rates.
    async fn current_rates(&self) -> Result<MarketRates, MarketRateError>;
}

/// Provider returning fixed rates, typically taken from configuration.
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    rates: MarketRates,
}

impl StaticRateProvider {
    /// Creates a provider that always returns `rates`.
    #[must_use]
    pub const fn new(rates: MarketRates) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl MarketRateProvider for StaticRateProvider {
    async fn current_rates(&self) -> Result<MarketRates, MarketRateError> {
        Ok(self.rates)
    }
}
