//! `Record` implementations for the domain types.

use moneta_core::budget::{BudgetCategory, Expense, Subscription};
use moneta_core::income::IncomeSource;
use moneta_core::ledger::Obligation;
use moneta_shared::types::{
    BudgetCategoryId, ExpenseId, IncomeSourceId, ObligationId, SubscriptionId,
};

use super::Record;

impl Record for IncomeSource {
    type Id = IncomeSourceId;
    const COLLECTION: &'static str = "income_sources";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Record for Obligation {
    type Id = ObligationId;
    const COLLECTION: &'static str = "obligations";

    fn id(&self) -> Self::Id {
        Obligation::id(self)
    }
}

impl Record for BudgetCategory {
    type Id = BudgetCategoryId;
    const COLLECTION: &'static str = "budget_categories";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Record for Subscription {
    type Id = SubscriptionId;
    const COLLECTION: &'static str = "subscriptions";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Record for Expense {
    type Id = ExpenseId;
    const COLLECTION: &'static str = "expenses";

    fn id(&self) -> Self::Id {
        self.id
    }
}
