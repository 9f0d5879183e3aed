//! Pure snapshot computation.

use tracing::debug;

use super::types::{Snapshot, SnapshotInputs, SnapshotSettings};
use crate::budget::BudgetReconciler;
use crate::income::{IncomeAggregator, IncomeError};
use crate::ledger::ObligationOutflows;

/// Builds snapshots from resolved inputs.
pub struct SnapshotCalculator;

impl SnapshotCalculator {
    /// Computes a snapshot, or `None` while any input is still missing.
    ///
    /// Never returns a partially filled snapshot.
    ///
    /// # Errors
    ///
    /// Propagates income aggregation errors under the `throw` policy.
    pub fn compute(
        inputs: &SnapshotInputs<'_>,
        settings: &SnapshotSettings,
    ) -> Result<Option<Snapshot>, IncomeError> {
        let (
            Some(income_sources),
            Some(obligations),
            Some(categories),
            Some(subscriptions),
            Some(expenses),
        ) = (
            inputs.income_sources,
            inputs.obligations,
            inputs.categories,
            inputs.subscriptions,
            inputs.expenses,
        )
        else {
            return Ok(None);
        };

        let aggregator = IncomeAggregator::new(settings.on_unknown_frequency);
        let income_total = aggregator.total_monthly_income(income_sources)?;
        let annual_income_projection = aggregator.annual_projection(income_sources)?;

        let outflows = ObligationOutflows::from_obligations(obligations);
        let variable_planned = BudgetReconciler::variable_planned(categories);
        let variable_used =
            BudgetReconciler::variable_used_for_month(categories, expenses, settings.as_of);
        let reconciliation = BudgetReconciler::reconcile(income_total, variable_used, &outflows);

        let snapshot = Snapshot {
            as_of: settings.as_of,
            currency: settings.currency,
            income_total,
            fixed_expense_total: BudgetReconciler::fixed_expense_total(categories, subscriptions),
            investment_outflow: outflows.investments,
            debt_outflow: outflows.debts,
            goals_outflow: outflows.goals,
            variable_planned,
            variable_used,
            variable_remaining: BudgetReconciler::variable_remaining(
                variable_planned,
                variable_used,
            ),
            variable_utilization_percent: BudgetReconciler::utilization_percent(
                variable_planned,
                variable_used,
            ),
            committed_balance: reconciliation.committed_balance,
            free_balance: reconciliation.free_balance,
            annual_income_projection,
        };

        debug!(
            as_of = %settings.as_of,
            income_total = %snapshot.income_total,
            free_balance = %snapshot.free_balance,
            "Snapshot computed"
        );

        Ok(Some(snapshot))
    }
}
