//! Insight data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use moneta_shared::config::InsightConfig;

/// Rule that produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Goal close to its target.
    GoalProgress,
    /// Goal behind schedule.
    GoalPace,
    /// Debt installment large relative to the debt.
    HighInstallment,
    /// Investment about to reach its target.
    InvestmentNearGoal,
    /// Income concentrated in one source, or missing.
    IncomeConcentration,
}

impl InsightKind {
    /// Stable name, also used as the insight id prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoalProgress => "goal-progress",
            Self::GoalPace => "goal-pace",
            Self::HighInstallment => "debt-high-installment",
            Self::InvestmentNearGoal => "investment-near-goal",
            Self::IncomeConcentration => "income",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Good news.
    Positive,
    /// Informational.
    Neutral,
    /// Worth attention.
    Warning,
    /// Requires attention now.
    Danger,
}

impl Severity {
    /// Stable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Numeric priority for ranking (higher = shown first).
    pub const fn priority(self) -> u8 {
        match self {
            Self::Neutral => 1,
            Self::Positive => 2,
            Self::Warning => 3,
            Self::Danger => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One human-readable insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRecord {
    /// Deterministic id: rule name plus entity id.
    pub id: String,
    /// Rule that produced it.
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Severity.
    pub severity: Severity,
    /// Short title.
    pub title: String,
    /// Full message.
    pub message: String,
}

impl InsightRecord {
    /// Creates a record whose id is `"{kind}-{entity}"`.
    pub fn new(
        kind: InsightKind,
        entity: impl fmt::Display,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{kind}-{entity}"),
            kind,
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Rule thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightThresholds {
    /// Progress percent at or above which a goal is celebrated.
    pub goal_progress_percent: Decimal,
    /// Pace below which a goal is a warning.
    pub behind_warning_months: Decimal,
    /// Pace below which a goal is a danger.
    pub behind_danger_months: Decimal,
    /// Installment share of the debt target, in percent, above which it is flagged.
    pub high_installment_percent: Decimal,
    /// Months-to-goal at or below which an investment is celebrated.
    pub investment_near_goal_months: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self::from(&InsightConfig::default())
    }
}

impl From<&InsightConfig> for InsightThresholds {
    fn from(config: &InsightConfig) -> Self {
        Self {
            goal_progress_percent: config.goal_progress_percent,
            behind_warning_months: config.behind_warning_months,
            behind_danger_months: config.behind_danger_months,
            high_installment_percent: config.high_installment_percent,
            investment_near_goal_months: config.investment_near_goal_months,
        }
    }
}
