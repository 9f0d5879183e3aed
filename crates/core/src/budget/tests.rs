//! Property-based tests for budget reconciliation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::BudgetReconciler;
use crate::ledger::ObligationOutflows;

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

proptest! {
    /// Feature: budget-reconciler, Property 1: Balance Equation
    /// free_balance == income - committed_balance exactly, with no rounding drift
    #[test]
    fn test_balance_equation(
        income in 0i64..100_000_000,
        used in 0i64..10_000_000,
        goals in 0i64..10_000_000,
        debts in 0i64..10_000_000,
        investments in 0i64..10_000_000,
    ) {
        let outflows = ObligationOutflows {
            goals: money(goals),
            debts: money(debts),
            investments: money(investments),
        };
        let result = BudgetReconciler::reconcile(money(income), money(used), &outflows);

        prop_assert_eq!(result.free_balance, money(income) - result.committed_balance);
        prop_assert_eq!(
            result.committed_balance,
            money(used) + money(goals) + money(debts) + money(investments)
        );
    }

    /// Feature: budget-reconciler, Property 2: Remaining Never Negative
    /// variable_remaining >= 0 and equals planned - used whenever used <= planned
    #[test]
    fn test_remaining_never_negative(
        planned in 0i64..10_000_000,
        used in 0i64..20_000_000,
    ) {
        let remaining = BudgetReconciler::variable_remaining(money(planned), money(used));
        prop_assert!(remaining >= Decimal::ZERO);
        if used <= planned {
            prop_assert_eq!(remaining, money(planned) - money(used));
        }
    }
}
