//! Ledger metrics: progress, pace and monthly outflows.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use moneta_shared::types::{ObligationId, round_money};

use super::types::{Debt, Goal, Investment, Obligation, ObligationHeader, ObligationKind};
use crate::installment::Installment;
use crate::market::MarketRates;
use crate::projection::{ProjectionEngine, ProjectionError};

/// Stateless ledger calculations.
pub struct LedgerService;

impl LedgerService {
    /// Progress towards the target, in percent, clamped to `[0, 100]`.
    ///
    /// A target of zero yields 0.
    #[must_use]
    pub fn progress_percent(obligation: &Obligation) -> Decimal {
        Self::header_progress(obligation.header())
    }

    /// Progress of any obligation header, rounded for display.
    #[must_use]
    pub fn header_progress(header: &ObligationHeader) -> Decimal {
        round_money(Self::progress_ratio(header))
    }

    /// Unrounded progress percent, clamped to `[0, 100]`. Thresholds compare against this.
    #[must_use]
    pub fn progress_ratio(header: &ObligationHeader) -> Decimal {
        if header.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let ratio = header.current_amount / header.target_amount * Decimal::ONE_HUNDRED;
        ratio.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Months of planned contributions needed to cover what is left.
    ///
    /// `None` when there is no positive contribution or nothing is left.
    #[must_use]
    pub fn estimated_months_to_target(goal: &Goal) -> Option<u32> {
        let contribution = goal.monthly_contribution.filter(|c| *c > Decimal::ZERO)?;
        let remaining = goal.header.remaining();
        if remaining <= Decimal::ZERO {
            return None;
        }
        u32::try_from((remaining / contribution).ceil()).ok()
    }

    /// Whole calendar months from `start` to `end`; zero if `end` is not after `start`.
    #[must_use]
    pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
        if end <= start {
            return 0;
        }
        let raw = (month_index(end) - month_index(start)).max(0);
        let mut months = u32::try_from(raw).unwrap_or(0);
        // The last month only counts once its day has been reached.
        while months > 0
            && start
                .checked_add_months(Months::new(months))
                .is_none_or(|d| d > end)
        {
            months -= 1;
        }
        months
    }

    /// Months between creation and deadline, if the goal has a deadline after its creation.
    #[must_use]
    pub fn planned_months(goal: &Goal) -> Option<u32> {
        let deadline = goal.deadline.filter(|d| *d > goal.header.created_at)?;
        Some(Self::whole_months_between(goal.header.created_at, deadline).max(1))
    }

    /// Amount the goal should accumulate per month to meet its deadline.
    #[must_use]
    pub fn expected_monthly_pace(goal: &Goal) -> Option<Decimal> {
        let planned = Self::planned_months(goal)?;
        Some(goal.header.target_amount / Decimal::from(planned))
    }

    /// Signed number of months the goal is ahead (positive) or behind (negative) schedule.
    ///
    /// `None` when the pace is unknown or zero; it never defaults to 0.
    /// The value is not rounded.
    #[must_use]
    pub fn ahead_or_behind_months(
        goal: &Goal,
        elapsed_months: u32,
        expected_monthly_pace: Option<Decimal>,
    ) -> Option<Decimal> {
        let pace = expected_monthly_pace.filter(|p| !p.is_zero())?;
        let expected = (pace * Decimal::from(elapsed_months)).min(goal.header.target_amount);
        Some((goal.header.current_amount - expected) / pace)
    }

    /// Pace of a goal evaluated on `as_of`.
    #[must_use]
    pub fn pace_as_of(goal: &Goal, as_of: NaiveDate) -> Option<Decimal> {
        let elapsed = Self::whole_months_between(goal.header.created_at, as_of);
        Self::ahead_or_behind_months(goal, elapsed, Self::expected_monthly_pace(goal))
    }

    /// Sum of each debt's next pending installment.
    pub fn monthly_debt_outflow<'a>(debts: impl IntoIterator<Item = &'a Debt>) -> Decimal {
        debts
            .into_iter()
            .filter_map(Debt::next_pending)
            .map(|i| i.amount)
            .sum()
    }

    /// Sum of the goals' planned monthly contributions.
    pub fn monthly_goals_outflow<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Decimal {
        goals
            .into_iter()
            .map(|g| g.monthly_contribution.unwrap_or_default())
            .sum()
    }

    /// Sum of the investments' automatic monthly contributions.
    pub fn monthly_investments_outflow<'a>(
        investments: impl IntoIterator<Item = &'a Investment>,
    ) -> Decimal {
        investments
            .into_iter()
            .map(|i| i.auto_rule_monthly.unwrap_or_default())
            .sum()
    }

    /// Months until an investment reaches its target under `rates`.
    ///
    /// The investment's own asset return, when set, overrides the market one.
    ///
    /// # Errors
    ///
    /// Fails when a rate has no monthly equivalent.
    pub fn investment_months_to_goal(
        investment: &Investment,
        rates: &MarketRates,
        horizon: u32,
    ) -> Result<Option<u32>, ProjectionError> {
        let asset_return = investment
            .projection
            .as_ref()
            .and_then(|p| p.asset_annual_return)
            .or(rates.asset_annual_return);
        let monthly_return =
            ProjectionEngine::combined_monthly_rate(rates.reference_annual_rate, asset_return)?;
        Ok(ProjectionEngine::months_to_target(
            investment.header.current_amount,
            investment.auto_rule_monthly.unwrap_or_default(),
            investment.header.target_amount,
            monthly_return,
            horizon,
        ))
    }

    /// Derived metrics for one obligation.
    ///
    /// `rates` is only needed for investments; without it their months to
    /// goal stays `None`.
    #[must_use]
    pub fn summarize(
        obligation: &Obligation,
        as_of: NaiveDate,
        rates: Option<&MarketRates>,
        horizon: u32,
    ) -> ObligationSummary {
        let header = obligation.header();
        let mut summary = ObligationSummary {
            id: header.id,
            kind: obligation.kind(),
            title: header.title.clone(),
            target_amount: header.target_amount,
            current_amount: header.current_amount,
            progress_percent: Self::header_progress(header),
            estimated_months_to_target: None,
            ahead_or_behind_months: None,
            next_installment: None,
            months_to_goal: None,
        };

        match obligation {
            Obligation::Goal(goal) => {
                summary.estimated_months_to_target = Self::estimated_months_to_target(goal);
                summary.ahead_or_behind_months =
                    Self::pace_as_of(goal, as_of).map(round_money);
            }
            Obligation::Debt(debt) => {
                summary.next_installment = debt.next_pending().cloned();
            }
            Obligation::Investment(investment) => {
                if let Some(rates) = rates {
                    summary.months_to_goal =
                        match Self::investment_months_to_goal(investment, rates, horizon) {
                            Ok(months) => months,
                            Err(e) => {
                                warn!(investment_id = %header.id, error = %e, "Cannot project investment");
                                None
                            }
                        };
                }
            }
        }
        summary
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Monthly outflows split by obligation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObligationOutflows {
    /// Goal contributions.
    pub goals: Decimal,
    /// Next pending debt installments.
    pub debts: Decimal,
    /// Investment auto-contributions.
    pub investments: Decimal,
}

impl ObligationOutflows {
    /// Computes outflows over a mixed list of obligations.
    #[must_use]
    pub fn from_obligations(obligations: &[Obligation]) -> Self {
        let mut goals = Vec::new();
        let mut debts = Vec::new();
        let mut investments = Vec::new();
        for obligation in obligations {
            match obligation {
                Obligation::Goal(g) => goals.push(g),
                Obligation::Debt(d) => debts.push(d),
                Obligation::Investment(i) => investments.push(i),
            }
        }
        Self {
            goals: LedgerService::monthly_goals_outflow(goals),
            debts: LedgerService::monthly_debt_outflow(debts),
            investments: LedgerService::monthly_investments_outflow(investments),
        }
    }

    /// Sum of the three buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.goals + self.debts + self.investments
    }
}

/// Per-obligation metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObligationSummary {
    /// Obligation ID.
    pub id: ObligationId,
    /// Obligation kind.
    pub kind: ObligationKind,
    /// Title.
    pub title: String,
    /// Target amount.
    pub target_amount: Decimal,
    /// Current amount.
    pub current_amount: Decimal,
    /// Progress in `[0, 100]`.
    pub progress_percent: Decimal,
    /// Goals only.
    pub estimated_months_to_target: Option<u32>,
    /// Goals only; negative means behind schedule.
    pub ahead_or_behind_months: Option<Decimal>,
    /// Debts only.
    pub next_installment: Option<Installment>,
    /// Investments only, when market rates are known.
    pub months_to_goal: Option<u32>,
}
