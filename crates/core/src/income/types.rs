//! Income data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::IncomeSourceId;

/// How often an amount recurs.
///
/// Shared by income sources and subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Once a month.
    Monthly,
    /// Every two weeks (26 times a year).
    Biweekly,
    /// Every week (52 times a year).
    Weekly,
    /// Once a year.
    Annual,
    /// A single, non-recurring amount.
    OneTime,
}

impl Frequency {
    /// Occurrences per year, or zero for non-recurring amounts.
    #[must_use]
    pub const fn occurrences_per_year(self) -> i64 {
        match self {
            Self::Monthly => 12,
            Self::Biweekly => 26,
            Self::Weekly => 52,
            Self::Annual => 1,
            Self::OneTime => 0,
        }
    }

    /// Monthly-equivalent multiplier (occurrences per year / 12).
    ///
    /// Prefer [`Frequency::monthly_equivalent`] for amounts; it divides last
    /// to avoid repeating-decimal drift.
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        Decimal::from(self.occurrences_per_year()) / Decimal::from(12)
    }

    /// Converts an amount at this frequency to its monthly equivalent.
    #[must_use]
    pub fn monthly_equivalent(self, amount: Decimal) -> Decimal {
        match self {
            Self::Monthly => amount,
            Self::OneTime => Decimal::ZERO,
            _ => amount * Decimal::from(self.occurrences_per_year()) / Decimal::from(12),
        }
    }

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Biweekly => "biweekly",
            Self::Weekly => "weekly",
            Self::Annual => "annual",
            Self::OneTime => "one_time",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "monthly" => Ok(Self::Monthly),
            "biweekly" => Ok(Self::Biweekly),
            "weekly" => Ok(Self::Weekly),
            "annual" | "yearly" => Ok(Self::Annual),
            "one_time" | "onetime" => Ok(Self::OneTime),
            _ => Err(format!("Unknown frequency: {s}")),
        }
    }
}

/// An income source as held by the record store.
///
/// The frequency is kept as the raw stored string: records written by other
/// clients may carry values this version does not understand, and the
/// aggregator decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSource {
    /// Source ID.
    pub id: IncomeSourceId,
    /// Display name.
    pub name: String,
    /// Amount received per occurrence.
    pub amount: Decimal,
    /// Raw frequency code (see [`Frequency`]).
    pub frequency: String,
}

impl IncomeSource {
    /// Creates a source with a known frequency.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Decimal, frequency: Frequency) -> Self {
        Self {
            id: IncomeSourceId::new(),
            name: name.into(),
            amount,
            frequency: frequency.as_str().to_string(),
        }
    }

    /// Parses the stored frequency.
    pub fn parsed_frequency(&self) -> Result<Frequency, String> {
        self.frequency.parse()
    }
}
