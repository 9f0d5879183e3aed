//! Obligation data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::{InstallmentId, ObligationId};

use super::error::LedgerError;
use crate::installment::{Installment, InstallmentScheduler, InstallmentStatus};

/// Fields common to every obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationHeader {
    /// Obligation ID.
    pub id: ObligationId,
    /// Display title.
    pub title: String,
    /// Amount to reach (goal/investment) or to repay (debt).
    pub target_amount: Decimal,
    /// Amount accumulated or repaid so far.
    pub current_amount: Decimal,
    /// Creation date.
    pub created_at: NaiveDate,
}

impl ObligationHeader {
    fn create(
        title: String,
        target_amount: Decimal,
        current_amount: Decimal,
        created_at: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if title.trim().is_empty() {
            return Err(LedgerError::BlankTitle);
        }
        if target_amount < Decimal::ZERO || current_amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        Ok(Self {
            id: ObligationId::new(),
            title,
            target_amount,
            current_amount,
            created_at,
        })
    }

    /// Amount still missing to reach the target, never negative.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }
}

/// A savings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Common fields.
    pub header: ObligationHeader,
    /// Date the goal should be reached by.
    pub deadline: Option<NaiveDate>,
    /// Planned monthly contribution.
    pub monthly_contribution: Option<Decimal>,
}

/// Per-investment projection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    /// Projection horizon in months.
    pub months: u32,
    /// Asset return overriding the market-wide one for this investment.
    pub asset_annual_return: Option<Decimal>,
}

/// An investment with an automatic monthly contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    /// Common fields.
    pub header: ObligationHeader,
    /// Recurring monthly contribution.
    pub auto_rule_monthly: Option<Decimal>,
    /// Projection settings, if the user asked for one.
    pub projection: Option<ProjectionSettings>,
}

/// A debt repaid through a fixed installment plan.
///
/// The installment list is private: a debt is only built through
/// [`Debt::create`], which generates the full plan, and installments only
/// change through [`Debt::settle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    /// Common fields.
    pub header: ObligationHeader,
    installments_count: u32,
    installment_amount: Decimal,
    first_due_date: NaiveDate,
    installments: Vec<Installment>,
    settled_on: Option<NaiveDate>,
}

/// Result of settling one installment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// The installment after settlement.
    pub installment: Installment,
    /// Whether this settlement paid off the debt.
    pub debt_settled: bool,
}

impl Debt {
    /// Builds a debt together with its full installment plan.
    ///
    /// # Errors
    ///
    /// Rejects non-positive counts or amounts, and fails if the generated
    /// plan does not match the declared count.
    pub fn create(input: NewDebt, created_at: NaiveDate) -> Result<Self, LedgerError> {
        if input.installments_count <= 0 {
            return Err(LedgerError::InvalidInstallmentCount(input.installments_count));
        }
        if input.installment_amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidInstallmentAmount(input.installment_amount));
        }

        let total = input.installment_amount * Decimal::from(input.installments_count);
        let header = ObligationHeader::create(
            input.title,
            input.target_amount.unwrap_or(total),
            Decimal::ZERO,
            created_at,
        )?;
        let installments = InstallmentScheduler::generate(
            header.id,
            input.installments_count,
            input.installment_amount,
            input.first_due_date,
        )?;
        let installments_count = u32::try_from(input.installments_count)
            .map_err(|_| LedgerError::InvalidInstallmentCount(input.installments_count))?;

        let debt = Self {
            header,
            installments_count,
            installment_amount: input.installment_amount,
            first_due_date: input.first_due_date,
            installments,
            settled_on: None,
        };
        debt.check_plan()?;
        Ok(debt)
    }

    /// Verifies the installment plan matches the declared count and schedule.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InstallmentSetMismatch` for a partial or malformed plan.
    pub fn check_plan(&self) -> Result<(), LedgerError> {
        let consistent = self.installments.len() == self.installments_count as usize
            && InstallmentScheduler::is_well_formed(
                self.header.id,
                self.first_due_date,
                &self.installments,
            );
        if consistent {
            Ok(())
        } else {
            Err(LedgerError::InstallmentSetMismatch {
                expected: self.installments_count,
                actual: self.installments.len(),
            })
        }
    }

    /// Declared number of installments.
    #[must_use]
    pub const fn installments_count(&self) -> u32 {
        self.installments_count
    }

    /// Amount of each installment.
    #[must_use]
    pub const fn installment_amount(&self) -> Decimal {
        self.installment_amount
    }

    /// Due date of the first installment.
    #[must_use]
    pub const fn first_due_date(&self) -> NaiveDate {
        self.first_due_date
    }

    /// The installment plan, ordered by sequence.
    #[must_use]
    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// Date the debt was paid off, if it was.
    #[must_use]
    pub const fn settled_on(&self) -> Option<NaiveDate> {
        self.settled_on
    }

    /// Whether every installment is paid.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled_on.is_some()
    }

    /// Lowest-sequence installment still pending.
    #[must_use]
    pub fn next_pending(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| i.is_pending())
    }

    /// Marks an installment as paid and credits its amount to the debt.
    ///
    /// All checks run before anything is mutated, so a failed call leaves the
    /// debt untouched.
    ///
    /// # Errors
    ///
    /// Fails if the installment is not part of this debt, is already paid, or
    /// the debt is already settled.
    pub fn settle(
        &mut self,
        installment_id: InstallmentId,
        paid_on: NaiveDate,
    ) -> Result<Settlement, LedgerError> {
        if self.is_settled() {
            return Err(LedgerError::DebtAlreadySettled(self.header.id));
        }
        let debt_id = self.header.id;
        let index = self
            .installments
            .iter()
            .position(|i| i.id == installment_id && i.debt_id == debt_id)
            .ok_or(LedgerError::InstallmentNotOwned {
                debt_id,
                installment_id,
            })?;
        if !self.installments[index].is_pending() {
            return Err(LedgerError::InstallmentAlreadyPaid(installment_id));
        }

        let installment = &mut self.installments[index];
        installment.status = InstallmentStatus::Paid;
        installment.paid_on = Some(paid_on);
        let settled = installment.clone();
        self.header.current_amount += settled.amount;

        let debt_settled = self.installments.iter().all(|i| !i.is_pending());
        if debt_settled {
            self.settled_on = Some(paid_on);
        }

        Ok(Settlement {
            installment: settled,
            debt_settled,
        })
    }
}

/// A goal, debt, or investment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Obligation {
    /// Savings goal.
    Goal(Goal),
    /// Installment debt.
    Debt(Debt),
    /// Investment.
    Investment(Investment),
}

/// Discriminator of an [`Obligation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    /// Savings goal.
    Goal,
    /// Installment debt.
    Debt,
    /// Investment.
    Investment,
}

impl Obligation {
    /// Common fields.
    #[must_use]
    pub const fn header(&self) -> &ObligationHeader {
        match self {
            Self::Goal(goal) => &goal.header,
            Self::Debt(debt) => &debt.header,
            Self::Investment(investment) => &investment.header,
        }
    }

    /// Obligation ID.
    #[must_use]
    pub const fn id(&self) -> ObligationId {
        self.header().id
    }

    /// Discriminator.
    #[must_use]
    pub const fn kind(&self) -> ObligationKind {
        match self {
            Self::Goal(_) => ObligationKind::Goal,
            Self::Debt(_) => ObligationKind::Debt,
            Self::Investment(_) => ObligationKind::Investment,
        }
    }

    /// Adds a contribution to a goal or investment.
    ///
    /// # Errors
    ///
    /// Rejects negative amounts and debts.
    pub fn contribute(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        let header = match self {
            Self::Goal(goal) => &mut goal.header,
            Self::Investment(investment) => &mut investment.header,
            Self::Debt(debt) => return Err(LedgerError::ContributionToDebt(debt.header.id)),
        };
        header.current_amount += amount;
        Ok(header.current_amount)
    }
}

/// Input for creating a goal.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    /// Title.
    pub title: String,
    /// Target amount.
    pub target_amount: Decimal,
    /// Amount already saved.
    #[serde(default)]
    pub current_amount: Decimal,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
    /// Planned monthly contribution.
    pub monthly_contribution: Option<Decimal>,
}

impl NewGoal {
    /// Validates the input and builds the goal.
    ///
    /// # Errors
    ///
    /// Rejects blank titles and negative amounts.
    pub fn build(self, created_at: NaiveDate) -> Result<Goal, LedgerError> {
        if self.monthly_contribution.is_some_and(|c| c < Decimal::ZERO) {
            return Err(LedgerError::NegativeAmount);
        }
        Ok(Goal {
            header: ObligationHeader::create(
                self.title,
                self.target_amount,
                self.current_amount,
                created_at,
            )?,
            deadline: self.deadline,
            monthly_contribution: self.monthly_contribution,
        })
    }
}

/// Input for creating a debt.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDebt {
    /// Title.
    pub title: String,
    /// Total to repay; defaults to count × amount.
    pub target_amount: Option<Decimal>,
    /// Number of installments.
    pub installments_count: i64,
    /// Amount of each installment.
    pub installment_amount: Decimal,
    /// Due date of the first installment.
    pub first_due_date: NaiveDate,
}

/// Input for creating an investment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvestment {
    /// Title.
    pub title: String,
    /// Target amount.
    pub target_amount: Decimal,
    /// Amount already invested.
    #[serde(default)]
    pub current_amount: Decimal,
    /// Recurring monthly contribution.
    pub auto_rule_monthly: Option<Decimal>,
    /// Projection settings.
    pub projection: Option<ProjectionSettings>,
}

impl NewInvestment {
    /// Validates the input and builds the investment.
    ///
    /// # Errors
    ///
    /// Rejects blank titles and negative amounts.
    pub fn build(self, created_at: NaiveDate) -> Result<Investment, LedgerError> {
        if self.auto_rule_monthly.is_some_and(|c| c < Decimal::ZERO) {
            return Err(LedgerError::NegativeAmount);
        }
        Ok(Investment {
            header: ObligationHeader::create(
                self.title,
                self.target_amount,
                self.current_amount,
                created_at,
            )?,
            auto_rule_monthly: self.auto_rule_monthly,
            projection: self.projection,
        })
    }
}
