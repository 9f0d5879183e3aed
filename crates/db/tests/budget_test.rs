//! Integration tests for income and budget repositories.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use moneta_core::budget::{BudgetError, NewBudgetCategory, NewExpense, NewSubscription};
use moneta_core::income::{Frequency, IncomeError};
use moneta_db::repositories::{CreateIncomeSourceInput, UpdateIncomeSourceInput};
use moneta_db::{Repositories, RepositoryError, StoreError};
use moneta_shared::types::BudgetCategoryId;

#[tokio::test]
async fn test_income_source_lifecycle() {
    let repos = Repositories::in_memory();

    let created = repos
        .income
        .create(CreateIncomeSourceInput {
            name: "Salary".to_string(),
            amount: dec!(5000),
            frequency: "Monthly".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.frequency, "monthly");

    let updated = repos
        .income
        .update(
            created.id,
            UpdateIncomeSourceInput {
                frequency: Some("biweekly".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.parsed_frequency(), Ok(Frequency::Biweekly));
    assert_eq!(updated.amount, dec!(5000));

    repos.income.delete(created.id).await.unwrap();
    assert!(repos.income.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_frequency_rejected_on_create() {
    let repos = Repositories::in_memory();
    let err = repos
        .income
        .create(CreateIncomeSourceInput {
            name: "Gig".to_string(),
            amount: dec!(100),
            frequency: "sometimes".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Income(IncomeError::UnknownFrequency { .. })
    ));
    assert!(repos.income.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_missing_source_is_not_found() {
    let repos = Repositories::in_memory();
    let err = repos
        .income
        .update(
            moneta_shared::types::IncomeSourceId::new(),
            UpdateIncomeSourceInput::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Store(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_expense_requires_existing_category() {
    let repos = Repositories::in_memory();
    let missing = BudgetCategoryId::new();

    let err = repos
        .budget
        .create_expense(NewExpense {
            category_id: missing,
            amount: dec!(20),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Budget(BudgetError::CategoryNotFound(missing))
    );

    let category = repos
        .budget
        .create_category(NewBudgetCategory {
            title: "Food".to_string(),
            limit_amount: dec!(600),
            is_fixed: false,
        })
        .await
        .unwrap();
    let expense = repos
        .budget
        .create_expense(NewExpense {
            category_id: category.id,
            amount: dec!(20),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(repos.budget.list_expenses().await.unwrap(), vec![expense]);
}

#[tokio::test]
async fn test_subscription_validation() {
    let repos = Repositories::in_memory();
    let err = repos
        .budget
        .create_subscription(NewSubscription {
            name: "Music".to_string(),
            amount: dec!(-10),
            frequency: Frequency::Monthly,
            active: true,
        })
        .await
        .unwrap_err();
    assert_eq!(err, RepositoryError::Budget(BudgetError::NegativeAmount));

    let created = repos
        .budget
        .create_subscription(NewSubscription {
            name: "Music".to_string(),
            amount: dec!(10),
            frequency: Frequency::Monthly,
            active: true,
        })
        .await
        .unwrap();
    assert_eq!(repos.budget.list_subscriptions().await.unwrap(), vec![created]);
}
