//! Snapshot data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use moneta_shared::config::UnknownFrequencyPolicy;
use moneta_shared::types::Currency;

use crate::budget::{BudgetCategory, Expense, Subscription};
use crate::income::IncomeSource;
use crate::ledger::Obligation;

/// Consistent view of the user's financial position for one month.
///
/// Sums are exact; only the utilization percentage is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Date the snapshot describes.
    pub as_of: NaiveDate,
    /// Currency of every amount.
    pub currency: Currency,
    /// Monthly-equivalent income.
    pub income_total: Decimal,
    /// Subscriptions plus fixed category limits. Reported, not committed.
    pub fixed_expense_total: Decimal,
    /// Investment auto-contributions.
    pub investment_outflow: Decimal,
    /// Next pending debt installments.
    pub debt_outflow: Decimal,
    /// Goal contributions.
    pub goals_outflow: Decimal,
    /// Limits of variable categories.
    pub variable_planned: Decimal,
    /// Variable spending this month.
    pub variable_used: Decimal,
    /// Planned minus used, never negative.
    pub variable_remaining: Decimal,
    /// Used over planned, in percent.
    pub variable_utilization_percent: Decimal,
    /// Variable spending plus obligation outflows.
    pub committed_balance: Decimal,
    /// Income minus committed balance.
    pub free_balance: Decimal,
    /// Income over the next 12 months.
    pub annual_income_projection: Decimal,
}

/// Upstream values feeding a snapshot. `None` means not loaded yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotInputs<'a> {
    /// Income sources.
    pub income_sources: Option<&'a [IncomeSource]>,
    /// Goals, debts and investments.
    pub obligations: Option<&'a [Obligation]>,
    /// Budget categories.
    pub categories: Option<&'a [BudgetCategory]>,
    /// Subscriptions.
    pub subscriptions: Option<&'a [Subscription]>,
    /// Expenses (the variable spend source).
    pub expenses: Option<&'a [Expense]>,
}

/// Settings applied to every snapshot computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSettings {
    /// Date the snapshot describes.
    pub as_of: NaiveDate,
    /// Currency of every amount.
    pub currency: Currency,
    /// Policy for income sources with unknown frequencies.
    pub on_unknown_frequency: UnknownFrequencyPolicy,
    /// Horizon for investment months-to-goal estimates.
    pub projection_horizon_months: u32,
}

/// Whether a snapshot can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    /// Some required source has not resolved yet.
    Loading,
    /// Some required source failed and has no previous value.
    Unavailable,
    /// A complete snapshot exists.
    Ready,
}
