//! Income source repository.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use moneta_core::income::{IncomeAggregator, IncomeSource};
use moneta_shared::types::IncomeSourceId;

use super::error::RepositoryError;
use crate::store::{Filter, RecordStore};

/// Input for creating an income source.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIncomeSourceInput {
    /// Display name.
    pub name: String,
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Frequency code.
    pub frequency: String,
}

/// Input for updating an income source. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIncomeSourceInput {
    /// New name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New frequency code.
    pub frequency: Option<String>,
}

/// Repository for income sources.
pub struct IncomeRepository {
    store: Arc<dyn RecordStore<IncomeSource>>,
}

impl IncomeRepository {
    /// Creates a repository over `store`.
    pub fn new(store: Arc<dyn RecordStore<IncomeSource>>) -> Self {
        Self { store }
    }

    /// Lists every income source.
    pub async fn list(&self) -> Result<Vec<IncomeSource>, RepositoryError> {
        Ok(self.store.list(&Filter::All).await?)
    }

    /// Validates and stores a new source.
    ///
    /// Unknown frequencies are rejected here regardless of the aggregation
    /// policy, so new records are always well formed.
    pub async fn create(
        &self,
        input: CreateIncomeSourceInput,
    ) -> Result<IncomeSource, RepositoryError> {
        let source = IncomeSource {
            id: IncomeSourceId::new(),
            name: input.name,
            amount: input.amount,
            frequency: input.frequency,
        };
        let frequency = IncomeAggregator::validate(&source)?;
        let mut source = source;
        source.frequency = frequency.as_str().to_string();

        let source = self.store.insert(source).await?;
        info!(source_id = %source.id, %frequency, "Income source created");
        Ok(source)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        id: IncomeSourceId,
        input: UpdateIncomeSourceInput,
    ) -> Result<IncomeSource, RepositoryError> {
        let mut source = self.store.get(id).await?;
        if let Some(name) = input.name {
            source.name = name;
        }
        if let Some(amount) = input.amount {
            source.amount = amount;
        }
        if let Some(frequency) = input.frequency {
            source.frequency = frequency;
        }
        let frequency = IncomeAggregator::validate(&source)?;
        source.frequency = frequency.as_str().to_string();

        let source = self.store.update(id, source).await?;
        info!(source_id = %id, "Income source updated");
        Ok(source)
    }

    /// Deletes a source.
    pub async fn delete(&self, id: IncomeSourceId) -> Result<(), RepositoryError> {
        self.store.delete(id).await?;
        info!(source_id = %id, "Income source deleted");
        Ok(())
    }
}
