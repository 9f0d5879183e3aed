//! Obligation repository: the only path through which goals, debts and
//! investments are mutated.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info};

use moneta_core::ledger::{
    Debt, LedgerError, LedgerEvent, NewDebt, NewGoal, NewInvestment, Obligation, Settlement,
};
use moneta_shared::types::{InstallmentId, ObligationId};

use super::error::RepositoryError;
use crate::store::{Filter, RecordStore};

/// Capacity of the settled-event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Repository for goals, debts and investments.
///
/// Mutations are serialized and follow read, check, write: the domain check
/// runs on a copy and only a successful store write makes it visible. A failed
/// write leaves the stored record untouched.
pub struct ObligationRepository {
    store: Arc<dyn RecordStore<Obligation>>,
    write_lock: Mutex<()>,
    events: broadcast::Sender<LedgerEvent>,
}

impl ObligationRepository {
    /// Creates a repository over `store`.
    pub fn new(store: Arc<dyn RecordStore<Obligation>>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            write_lock: Mutex::new(()),
            events,
        }
    }

    /// Subscribes to ledger events.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Lists every obligation.
    pub async fn list(&self) -> Result<Vec<Obligation>, RepositoryError> {
        Ok(self.store.list(&Filter::All).await?)
    }

    /// Fetches one obligation.
    pub async fn get(&self, id: ObligationId) -> Result<Obligation, RepositoryError> {
        Ok(self.store.get(id).await?)
    }

    /// Creates a goal.
    pub async fn create_goal(
        &self,
        input: NewGoal,
        created_at: NaiveDate,
    ) -> Result<Obligation, RepositoryError> {
        let goal = input.build(created_at)?;
        self.insert(Obligation::Goal(goal)).await
    }

    /// Creates a debt together with its full installment plan.
    ///
    /// The plan is embedded in the debt record, so it is written in the same
    /// single insert: no reader can see a debt without its installments.
    pub async fn create_debt(
        &self,
        input: NewDebt,
        created_at: NaiveDate,
    ) -> Result<Obligation, RepositoryError> {
        let debt = Debt::create(input, created_at)?;
        debug!(
            debt_id = %debt.header.id,
            installments = debt.installments_count(),
            "Installment plan generated"
        );
        self.insert(Obligation::Debt(debt)).await
    }

    /// Creates an investment.
    pub async fn create_investment(
        &self,
        input: NewInvestment,
        created_at: NaiveDate,
    ) -> Result<Obligation, RepositoryError> {
        let investment = input.build(created_at)?;
        self.insert(Obligation::Investment(investment)).await
    }

    async fn insert(&self, obligation: Obligation) -> Result<Obligation, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let obligation = self.store.insert(obligation).await?;
        info!(obligation_id = %obligation.id(), kind = ?obligation.kind(), "Obligation created");
        Ok(obligation)
    }

    /// Records a contribution to a goal or investment.
    pub async fn contribute(
        &self,
        id: ObligationId,
        amount: Decimal,
    ) -> Result<Obligation, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut obligation = self.store.get(id).await?;
        let current = obligation.contribute(amount)?;
        let obligation = self.store.update(id, obligation).await?;
        info!(obligation_id = %id, %amount, %current, "Contribution recorded");
        Ok(obligation)
    }

    /// Settles one installment of a debt.
    ///
    /// Marks the installment paid and credits the debt in one write. When the
    /// last installment is paid a [`LedgerEvent::DebtSettled`] is published,
    /// once.
    pub async fn settle_installment(
        &self,
        debt_id: ObligationId,
        installment_id: InstallmentId,
        paid_on: NaiveDate,
    ) -> Result<Settlement, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let Obligation::Debt(mut debt) = self.store.get(debt_id).await? else {
            return Err(LedgerError::NotADebt(debt_id).into());
        };

        let settlement = debt.settle(installment_id, paid_on)?;
        self.store.update(debt_id, Obligation::Debt(debt)).await?;
        info!(
            %debt_id,
            %installment_id,
            sequence = settlement.installment.sequence,
            amount = %settlement.installment.amount,
            "Installment settled"
        );

        if settlement.debt_settled {
            info!(%debt_id, "Debt fully settled");
            let event = LedgerEvent::DebtSettled {
                debt_id,
                settled_on: paid_on,
            };
            if self.events.send(event).is_err() {
                debug!(%debt_id, "No subscribers for settled event");
            }
        }

        Ok(settlement)
    }

    /// Deletes an obligation (and, for debts, its installments).
    pub async fn delete(&self, id: ObligationId) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        self.store.delete(id).await?;
        info!(obligation_id = %id, "Obligation deleted");
        Ok(())
    }
}
