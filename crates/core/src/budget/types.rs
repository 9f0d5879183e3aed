//! Budget data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::{BudgetCategoryId, ExpenseId, SubscriptionId};

use super::error::BudgetError;
use crate::income::Frequency;

/// A spending category with a monthly limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category ID.
    pub id: BudgetCategoryId,
    /// Display title.
    pub title: String,
    /// Monthly limit.
    pub limit_amount: Decimal,
    /// Fixed categories are excluded from the variable spending pool.
    pub is_fixed: bool,
}

/// A recurring subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Display name.
    pub name: String,
    /// Amount charged per occurrence.
    pub amount: Decimal,
    /// Billing frequency.
    pub frequency: Frequency,
    /// Inactive subscriptions are ignored.
    pub active: bool,
}

impl Subscription {
    /// Monthly-equivalent cost; zero when inactive.
    #[must_use]
    pub fn monthly_cost(&self) -> Decimal {
        if self.active {
            self.frequency.monthly_equivalent(self.amount)
        } else {
            Decimal::ZERO
        }
    }
}

/// A single expense booked against a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Category charged.
    pub category_id: BudgetCategoryId,
    /// Amount spent.
    pub amount: Decimal,
    /// Date of the expense.
    pub date: NaiveDate,
}

fn check_text(value: &str) -> Result<(), BudgetError> {
    if value.trim().is_empty() {
        Err(BudgetError::BlankTitle)
    } else {
        Ok(())
    }
}

fn check_amount(value: Decimal) -> Result<(), BudgetError> {
    if value < Decimal::ZERO {
        Err(BudgetError::NegativeAmount)
    } else {
        Ok(())
    }
}

/// Input for creating a budget category.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudgetCategory {
    /// Title.
    pub title: String,
    /// Monthly limit.
    pub limit_amount: Decimal,
    /// Whether the category is fixed.
    #[serde(default)]
    pub is_fixed: bool,
}

impl NewBudgetCategory {
    /// Validates the input and builds the category.
    ///
    /// # Errors
    ///
    /// Rejects blank titles and negative limits.
    pub fn build(self) -> Result<BudgetCategory, BudgetError> {
        check_text(&self.title)?;
        check_amount(self.limit_amount)?;
        Ok(BudgetCategory {
            id: BudgetCategoryId::new(),
            title: self.title,
            limit_amount: self.limit_amount,
            is_fixed: self.is_fixed,
        })
    }
}

/// Input for creating a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubscription {
    /// Name.
    pub name: String,
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Billing frequency.
    pub frequency: Frequency,
    /// Defaults to active.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl NewSubscription {
    /// Validates the input and builds the subscription.
    ///
    /// # Errors
    ///
    /// Rejects blank names and negative amounts.
    pub fn build(self) -> Result<Subscription, BudgetError> {
        check_text(&self.name)?;
        check_amount(self.amount)?;
        Ok(Subscription {
            id: SubscriptionId::new(),
            name: self.name,
            amount: self.amount,
            frequency: self.frequency,
            active: self.active,
        })
    }
}

/// Input for recording an expense.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    /// Category charged.
    pub category_id: BudgetCategoryId,
    /// Amount spent.
    pub amount: Decimal,
    /// Date of the expense.
    pub date: NaiveDate,
}

impl NewExpense {
    /// Validates the input and builds the expense.
    ///
    /// # Errors
    ///
    /// Rejects negative amounts.
    pub fn build(self) -> Result<Expense, BudgetError> {
        check_amount(self.amount)?;
        Ok(Expense {
            id: ExpenseId::new(),
            category_id: self.category_id,
            amount: self.amount,
            date: self.date,
        })
    }
}
