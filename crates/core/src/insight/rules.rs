//! Built-in insight rules.

use rust_decimal::Decimal;

use moneta_shared::types::round_money;

use super::engine::{InsightInputs, InsightRule};
use super::types::{InsightKind, InsightRecord, InsightThresholds, Severity};
use crate::ledger::{LedgerService, Obligation};

/// Goal at or above the progress threshold.
pub struct GoalProgressRule;

impl InsightRule for GoalProgressRule {
    fn kind(&self) -> InsightKind {
        InsightKind::GoalProgress
    }

    fn evaluate(
        &self,
        inputs: &InsightInputs<'_>,
        thresholds: &InsightThresholds,
    ) -> Vec<InsightRecord> {
        inputs
            .obligations
            .iter()
            .filter(|o| matches!(o, Obligation::Goal(_)))
            .filter_map(|o| {
                let header = o.header();
                let progress = LedgerService::progress_ratio(header);
                (progress >= thresholds.goal_progress_percent).then(|| {
                    let progress = round_money(progress);
                    InsightRecord::new(
                        self.kind(),
                        header.id,
                        Severity::Positive,
                        format!("{} is almost there", header.title),
                        format!("You have reached {progress}% of \"{}\".", header.title),
                    )
                })
            })
            .collect()
    }
}

/// Goal behind schedule.
pub struct GoalPaceRule;

impl InsightRule for GoalPaceRule {
    fn kind(&self) -> InsightKind {
        InsightKind::GoalPace
    }

    fn evaluate(
        &self,
        inputs: &InsightInputs<'_>,
        thresholds: &InsightThresholds,
    ) -> Vec<InsightRecord> {
        inputs
            .obligations
            .iter()
            .filter_map(|o| match o {
                Obligation::Goal(goal) => Some(goal),
                _ => None,
            })
            .filter_map(|goal| {
                let pace = LedgerService::pace_as_of(goal, inputs.as_of)?;
                let severity = if pace < thresholds.behind_danger_months {
                    Severity::Danger
                } else if pace < thresholds.behind_warning_months {
                    Severity::Warning
                } else {
                    return None;
                };
                Some(InsightRecord::new(
                    self.kind(),
                    goal.header.id,
                    severity,
                    format!("{} is behind schedule", goal.header.title),
                    format!(
                        "\"{}\" is {} months behind the pace needed to meet its deadline.",
                        goal.header.title,
                        round_money(pace.abs())
                    ),
                ))
            })
            .collect()
    }
}

/// Next pending installment above the configured share of the debt.
pub struct HighInstallmentRule;

impl InsightRule for HighInstallmentRule {
    fn kind(&self) -> InsightKind {
        InsightKind::HighInstallment
    }

    fn evaluate(
        &self,
        inputs: &InsightInputs<'_>,
        thresholds: &InsightThresholds,
    ) -> Vec<InsightRecord> {
        inputs
            .obligations
            .iter()
            .filter_map(|o| match o {
                Obligation::Debt(debt) => Some(debt),
                _ => None,
            })
            .filter_map(|debt| {
                let next = debt.next_pending()?;
                let limit = debt.header.target_amount * thresholds.high_installment_percent
                    / Decimal::ONE_HUNDRED;
                (next.amount > limit).then(|| {
                    InsightRecord::new(
                        self.kind(),
                        debt.header.id,
                        Severity::Danger,
                        format!("High installment on {}", debt.header.title),
                        format!(
                            "Installment {} of \"{}\" ({}) is more than {}% of the debt.",
                            next.sequence,
                            debt.header.title,
                            next.amount,
                            thresholds.high_installment_percent
                        ),
                    )
                })
            })
            .collect()
    }
}

/// Investment projected to reach its target soon. Needs market rates.
pub struct InvestmentNearGoalRule;

impl InsightRule for InvestmentNearGoalRule {
    fn kind(&self) -> InsightKind {
        InsightKind::InvestmentNearGoal
    }

    fn evaluate(
        &self,
        inputs: &InsightInputs<'_>,
        thresholds: &InsightThresholds,
    ) -> Vec<InsightRecord> {
        let Some(rates) = inputs.market_rates else {
            return vec![];
        };
        inputs
            .obligations
            .iter()
            .filter_map(|o| match o {
                Obligation::Investment(investment) => Some(investment),
                _ => None,
            })
            .filter_map(|investment| {
                let months = LedgerService::investment_months_to_goal(
                    investment,
                    rates,
                    inputs.projection_horizon_months,
                )
                .ok()
                .flatten()?;
                (months <= thresholds.investment_near_goal_months).then(|| {
                    let message = if months == 0 {
                        format!("\"{}\" has reached its target.", investment.header.title)
                    } else {
                        format!(
                            "\"{}\" should reach its target in {months} month(s).",
                            investment.header.title
                        )
                    };
                    InsightRecord::new(
                        self.kind(),
                        investment.header.id,
                        Severity::Positive,
                        format!("{} is close to its goal", investment.header.title),
                        message,
                    )
                })
            })
            .collect()
    }
}

/// No income source (danger) or a single one (neutral).
pub struct IncomeConcentrationRule;

impl InsightRule for IncomeConcentrationRule {
    fn kind(&self) -> InsightKind {
        InsightKind::IncomeConcentration
    }

    fn evaluate(
        &self,
        inputs: &InsightInputs<'_>,
        _thresholds: &InsightThresholds,
    ) -> Vec<InsightRecord> {
        match inputs.income_sources.len() {
            0 => vec![InsightRecord::new(
                self.kind(),
                0,
                Severity::Danger,
                "No income registered",
                "Add at least one income source so commitments can be checked against it.",
            )],
            1 => vec![InsightRecord::new(
                self.kind(),
                1,
                Severity::Neutral,
                "Single income source",
                format!(
                    "All of your income comes from \"{}\". Consider diversifying.",
                    inputs.income_sources[0].name
                ),
            )],
            _ => vec![],
        }
    }
}
