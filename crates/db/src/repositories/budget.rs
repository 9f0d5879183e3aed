//! Budget repository: categories, subscriptions and expenses.

use std::sync::Arc;

use tracing::info;

use moneta_core::budget::{
    BudgetCategory, BudgetError, Expense, NewBudgetCategory, NewExpense, NewSubscription,
    Subscription,
};
use moneta_shared::types::{BudgetCategoryId, ExpenseId, SubscriptionId};

use super::error::RepositoryError;
use crate::store::{Filter, RecordStore, StoreError};

/// Repository for budget records.
pub struct BudgetRepository {
    categories: Arc<dyn RecordStore<BudgetCategory>>,
    subscriptions: Arc<dyn RecordStore<Subscription>>,
    expenses: Arc<dyn RecordStore<Expense>>,
}

impl BudgetRepository {
    /// Creates a repository over the three stores.
    pub fn new(
        categories: Arc<dyn RecordStore<BudgetCategory>>,
        subscriptions: Arc<dyn RecordStore<Subscription>>,
        expenses: Arc<dyn RecordStore<Expense>>,
    ) -> Self {
        Self {
            categories,
            subscriptions,
            expenses,
        }
    }

    /// Lists budget categories.
    pub async fn list_categories(&self) -> Result<Vec<BudgetCategory>, RepositoryError> {
        Ok(self.categories.list(&Filter::All).await?)
    }

    /// Creates a budget category.
    pub async fn create_category(
        &self,
        input: NewBudgetCategory,
    ) -> Result<BudgetCategory, RepositoryError> {
        let category = self.categories.insert(input.build()?).await?;
        info!(category_id = %category.id, is_fixed = category.is_fixed, "Budget category created");
        Ok(category)
    }

    /// Deletes a budget category.
    pub async fn delete_category(&self, id: BudgetCategoryId) -> Result<(), RepositoryError> {
        self.categories.delete(id).await?;
        info!(category_id = %id, "Budget category deleted");
        Ok(())
    }

    /// Lists subscriptions.
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, RepositoryError> {
        Ok(self.subscriptions.list(&Filter::All).await?)
    }

    /// Creates a subscription.
    pub async fn create_subscription(
        &self,
        input: NewSubscription,
    ) -> Result<Subscription, RepositoryError> {
        let subscription = self.subscriptions.insert(input.build()?).await?;
        info!(subscription_id = %subscription.id, "Subscription created");
        Ok(subscription)
    }

    /// Deletes a subscription.
    pub async fn delete_subscription(&self, id: SubscriptionId) -> Result<(), RepositoryError> {
        self.subscriptions.delete(id).await?;
        info!(subscription_id = %id, "Subscription deleted");
        Ok(())
    }

    /// Lists expenses.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>, RepositoryError> {
        Ok(self.expenses.list(&Filter::All).await?)
    }

    /// Records an expense against an existing category.
    pub async fn create_expense(&self, input: NewExpense) -> Result<Expense, RepositoryError> {
        let expense = input.build()?;
        match self.categories.get(expense.category_id).await {
            Ok(_) => {}
            Err(StoreError::NotFound { .. }) => {
                return Err(BudgetError::CategoryNotFound(expense.category_id).into());
            }
            Err(e) => return Err(e.into()),
        }
        let expense = self.expenses.insert(expense).await?;
        info!(expense_id = %expense.id, category_id = %expense.category_id, "Expense recorded");
        Ok(expense)
    }

    /// Deletes an expense.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<(), RepositoryError> {
        self.expenses.delete(id).await?;
        info!(expense_id = %id, "Expense deleted");
        Ok(())
    }
}
