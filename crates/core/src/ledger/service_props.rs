//! Property-based tests for ledger metrics.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::{LedgerService, ObligationOutflows};
use super::types::{Debt, NewDebt, NewGoal, NewInvestment, Obligation};

fn created() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

proptest! {
    /// Feature: obligation-ledger, Property 1: Progress Bound
    /// For any goal or investment, 0 <= progress <= 100, including over-funded and zero targets
    #[test]
    fn test_progress_bound(
        target in 0i64..10_000_000,
        current in 0i64..20_000_000,
        as_investment in any::<bool>(),
    ) {
        let obligation = if as_investment {
            Obligation::Investment(NewInvestment {
                title: "Fund".to_string(),
                target_amount: money(target),
                current_amount: money(current),
                auto_rule_monthly: None,
                projection: None,
            }.build(created()).unwrap())
        } else {
            Obligation::Goal(NewGoal {
                title: "Trip".to_string(),
                target_amount: money(target),
                current_amount: money(current),
                deadline: None,
                monthly_contribution: None,
            }.build(created()).unwrap())
        };

        let progress = LedgerService::progress_percent(&obligation);
        prop_assert!(progress >= Decimal::ZERO);
        prop_assert!(progress <= Decimal::ONE_HUNDRED);
        if target == 0 {
            prop_assert_eq!(progress, Decimal::ZERO);
        }
    }

    /// Feature: obligation-ledger, Property 2: Debt Progress Bound
    /// Settling any prefix of a debt's plan keeps progress within [0, 100]
    #[test]
    fn test_debt_progress_bound_while_settling(
        count in 1i64..=24,
        amount in 1i64..100_000,
        paid in 0usize..=24,
    ) {
        let mut debt = Debt::create(NewDebt {
            title: "Car".to_string(),
            target_amount: None,
            installments_count: count,
            installment_amount: money(amount),
            first_due_date: created(),
        }, created()).unwrap();

        let ids: Vec<_> = debt.installments().iter().take(paid).map(|i| i.id).collect();
        for id in &ids {
            debt.settle(*id, created()).unwrap();
        }

        let progress = LedgerService::progress_percent(&Obligation::Debt(debt.clone()));
        prop_assert!(progress >= Decimal::ZERO);
        prop_assert!(progress <= Decimal::ONE_HUNDRED);
        prop_assert_eq!(debt.is_settled(), ids.len() == usize::try_from(count).unwrap());
    }

    /// Feature: obligation-ledger, Property 3: Debt Outflow Is One Installment
    /// A debt's monthly outflow is its installment amount until settled, then zero
    #[test]
    fn test_debt_outflow_is_single_installment(
        count in 1i64..=12,
        amount in 1i64..100_000,
    ) {
        let debt = Debt::create(NewDebt {
            title: "Phone".to_string(),
            target_amount: None,
            installments_count: count,
            installment_amount: money(amount),
            first_due_date: created(),
        }, created()).unwrap();

        let outflows = ObligationOutflows::from_obligations(&[Obligation::Debt(debt)]);
        prop_assert_eq!(outflows.debts, money(amount));
        prop_assert_eq!(outflows.total(), money(amount));
    }
}
