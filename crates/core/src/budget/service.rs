//! Budget reconciliation.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use moneta_shared::types::{BudgetCategoryId, round_money};

use super::types::{BudgetCategory, Expense, Subscription};
use crate::ledger::ObligationOutflows;

/// Outcome of merging income, outflows and variable spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Income, variable spend and obligation outflows committed this month.
    pub committed_balance: Decimal,
    /// Income left after commitments. Negative when overcommitted.
    pub free_balance: Decimal,
}

/// Budget reconciliation logic.
pub struct BudgetReconciler;

impl BudgetReconciler {
    /// Sum of the limits of non-fixed categories.
    #[must_use]
    pub fn variable_planned(categories: &[BudgetCategory]) -> Decimal {
        categories
            .iter()
            .filter(|c| !c.is_fixed)
            .map(|c| c.limit_amount)
            .sum()
    }

    /// Variable spending in the calendar month of `as_of`.
    ///
    /// Only expenses against known, non-fixed categories count.
    #[must_use]
    pub fn variable_used_for_month(
        categories: &[BudgetCategory],
        expenses: &[Expense],
        as_of: NaiveDate,
    ) -> Decimal {
        let variable: HashSet<BudgetCategoryId> = categories
            .iter()
            .filter(|c| !c.is_fixed)
            .map(|c| c.id)
            .collect();
        expenses
            .iter()
            .filter(|e| e.date.year() == as_of.year() && e.date.month() == as_of.month())
            .filter(|e| variable.contains(&e.category_id))
            .map(|e| e.amount)
            .sum()
    }

    /// Planned minus used, never negative.
    #[must_use]
    pub fn variable_remaining(planned: Decimal, used: Decimal) -> Decimal {
        (planned - used).max(Decimal::ZERO)
    }

    /// Share of the variable plan already spent, in percent (2 dp).
    #[must_use]
    pub fn utilization_percent(planned: Decimal, used: Decimal) -> Decimal {
        if planned.is_zero() {
            Decimal::ZERO
        } else {
            round_money(used / planned * Decimal::ONE_HUNDRED)
        }
    }

    /// Active subscriptions (monthly equivalent) plus fixed category limits.
    #[must_use]
    pub fn fixed_expense_total(
        categories: &[BudgetCategory],
        subscriptions: &[Subscription],
    ) -> Decimal {
        let fixed_categories: Decimal = categories
            .iter()
            .filter(|c| c.is_fixed)
            .map(|c| c.limit_amount)
            .sum();
        let subscriptions: Decimal = subscriptions.iter().map(Subscription::monthly_cost).sum();
        fixed_categories + subscriptions
    }

    /// Committed and free balance.
    ///
    /// The fixed-expense bucket is reported separately and never added here,
    /// so subscriptions already paid out of variable spending are not counted twice.
    #[must_use]
    pub fn reconcile(
        income_total: Decimal,
        variable_used: Decimal,
        outflows: &ObligationOutflows,
    ) -> Reconciliation {
        let committed_balance =
            variable_used + outflows.investments + outflows.debts + outflows.goals;
        Reconciliation {
            committed_balance,
            free_balance: income_total - committed_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::Frequency;
    use moneta_shared::types::{ExpenseId, SubscriptionId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn category(limit: Decimal, is_fixed: bool) -> BudgetCategory {
        BudgetCategory {
            id: BudgetCategoryId::new(),
            title: "Groceries".to_string(),
            limit_amount: limit,
            is_fixed,
        }
    }

    fn expense(category: &BudgetCategory, amount: Decimal, on: NaiveDate) -> Expense {
        Expense {
            id: ExpenseId::new(),
            category_id: category.id,
            amount,
            date: on,
        }
    }

    fn subscription(amount: Decimal, frequency: Frequency, active: bool) -> Subscription {
        Subscription {
            id: SubscriptionId::new(),
            name: "Streaming".to_string(),
            amount,
            frequency,
            active,
        }
    }

    #[test]
    fn test_variable_planned_excludes_fixed() {
        let categories = vec![
            category(dec!(600), false),
            category(dec!(400), false),
            category(dec!(1500), true),
        ];
        assert_eq!(BudgetReconciler::variable_planned(&categories), dec!(1000));
        assert_eq!(BudgetReconciler::variable_planned(&[]), dec!(0));
    }

    #[test]
    fn test_variable_used_only_counts_current_month_variable_spend() {
        let food = category(dec!(600), false);
        let rent = category(dec!(1500), true);
        let expenses = vec![
            expense(&food, dec!(120), date(2025, 3, 1)),
            expense(&food, dec!(80), date(2025, 3, 31)),
            expense(&food, dec!(999), date(2025, 2, 28)),
            expense(&food, dec!(999), date(2024, 3, 15)),
            expense(&rent, dec!(1500), date(2025, 3, 5)),
        ];
        let used = BudgetReconciler::variable_used_for_month(
            &[food, rent],
            &expenses,
            date(2025, 3, 20),
        );
        assert_eq!(used, dec!(200));
    }

    #[rstest]
    #[case(dec!(1000), dec!(800), dec!(200))]
    #[case(dec!(1000), dec!(1000), dec!(0))]
    #[case(dec!(1000), dec!(1300), dec!(0))]
    fn test_variable_remaining_never_negative(
        #[case] planned: Decimal,
        #[case] used: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(BudgetReconciler::variable_remaining(planned, used), expected);
    }

    #[rstest]
    #[case(dec!(1000), dec!(800), dec!(80))]
    #[case(dec!(1000), dec!(1200), dec!(120))]
    #[case(dec!(0), dec!(500), dec!(0))]
    #[case(dec!(300), dec!(100), dec!(33.33))]
    fn test_utilization_percent(
        #[case] planned: Decimal,
        #[case] used: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(BudgetReconciler::utilization_percent(planned, used), expected);
    }

    #[test]
    fn test_fixed_expense_total() {
        let categories = vec![category(dec!(1500), true), category(dec!(600), false)];
        let subscriptions = vec![
            subscription(dec!(20), Frequency::Monthly, true),
            subscription(dec!(120), Frequency::Annual, true),
            subscription(dec!(50), Frequency::Monthly, false),
        ];
        assert_eq!(
            BudgetReconciler::fixed_expense_total(&categories, &subscriptions),
            dec!(1530)
        );
    }

    #[test]
    fn test_reconcile_reference_scenario() {
        let outflows = ObligationOutflows {
            goals: dec!(300),
            debts: dec!(250),
            investments: dec!(200),
        };
        let result = BudgetReconciler::reconcile(dec!(5000), dec!(800), &outflows);
        assert_eq!(result.committed_balance, dec!(1550));
        assert_eq!(result.free_balance, dec!(3450));
    }

    #[test]
    fn test_overcommitment_is_negative_free_balance() {
        let outflows = ObligationOutflows {
            goals: dec!(500),
            debts: dec!(900),
            investments: dec!(0),
        };
        let result = BudgetReconciler::reconcile(dec!(1000), dec!(200), &outflows);
        assert_eq!(result.free_balance, dec!(-600));
    }
}
