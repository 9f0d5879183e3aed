//! Per-source state tracking and memoized snapshot recomputation.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::compute::SnapshotCalculator;
use super::types::{Snapshot, SnapshotInputs, SnapshotSettings, SnapshotStatus};
use crate::budget::{BudgetCategory, Expense, Subscription};
use crate::error::ErrorClass;
use crate::income::{IncomeAggregator, IncomeError, IncomeSource};
use crate::insight::{InsightEngine, InsightInputs, InsightRecord};
use crate::ledger::{LedgerService, Obligation, ObligationSummary};
use crate::market::MarketRates;

/// Upstream data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Income sources.
    Income,
    /// Goals, debts and investments.
    Obligations,
    /// Budget categories.
    Categories,
    /// Subscriptions.
    Subscriptions,
    /// Expenses.
    Expenses,
    /// Market rates. Not required for the snapshot.
    MarketRates,
}

impl SourceKind {
    /// Sources the snapshot cannot be computed without.
    pub const REQUIRED: [Self; 5] = [
        Self::Income,
        Self::Obligations,
        Self::Categories,
        Self::Subscriptions,
        Self::Expenses,
    ];
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Income => "income",
            Self::Obligations => "obligations",
            Self::Categories => "categories",
            Self::Subscriptions => "subscriptions",
            Self::Expenses => "expenses",
            Self::MarketRates => "market_rates",
        };
        f.write_str(name)
    }
}

/// Ticket identifying one fetch of one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation {
    /// Source being fetched.
    pub source: SourceKind,
    /// Monotonic counter within that source.
    pub value: u64,
}

/// A fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} unavailable: {message}")]
pub struct SourceError {
    /// Source that failed.
    pub kind: SourceKind,
    /// Failure description.
    pub message: String,
}

impl SourceError {
    /// Creates a source error.
    pub fn new(kind: SourceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classifies the error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::PartialData
    }
}

/// Data delivered by a completed fetch.
#[derive(Debug, Clone)]
pub enum SourceData {
    /// Income sources.
    Income(Vec<IncomeSource>),
    /// Obligations.
    Obligations(Vec<Obligation>),
    /// Budget categories.
    Categories(Vec<BudgetCategory>),
    /// Subscriptions.
    Subscriptions(Vec<Subscription>),
    /// Expenses.
    Expenses(Vec<Expense>),
    /// Market rates.
    MarketRates(MarketRates),
}

impl SourceData {
    /// Source this data belongs to.
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Income(_) => SourceKind::Income,
            Self::Obligations(_) => SourceKind::Obligations,
            Self::Categories(_) => SourceKind::Categories,
            Self::Subscriptions(_) => SourceKind::Subscriptions,
            Self::Expenses(_) => SourceKind::Expenses,
            Self::MarketRates(_) => SourceKind::MarketRates,
        }
    }
}

/// Observable state of one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    /// Never resolved and not failed.
    Pending,
    /// Has a value (possibly from an earlier fetch).
    Resolved,
    /// Never resolved and the latest fetch failed.
    Failed,
}

/// What happened to a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The value replaced the slot's previous one.
    Applied,
    /// The failure was recorded; any previous value is kept.
    Failed,
    /// A newer fetch was issued since; the completion was discarded.
    Stale,
}

/// Latest-generation tracking for one source.
#[derive(Debug, Clone)]
pub struct SourceSlot<T> {
    generation: u64,
    value: Option<T>,
    error: Option<SourceError>,
    in_flight: bool,
}

impl<T> Default for SourceSlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            value: None,
            error: None,
            in_flight: false,
        }
    }
}

impl<T> SourceSlot<T> {
    /// Issues a new generation, superseding any fetch in flight.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = true;
        self.generation
    }

    /// Applies a completion if it belongs to the latest generation.
    pub fn complete(&mut self, generation: u64, result: Result<T, SourceError>) -> Completion {
        if generation != self.generation {
            return Completion::Stale;
        }
        self.in_flight = false;
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
                Completion::Applied
            }
            Err(error) => {
                self.error = Some(error);
                Completion::Failed
            }
        }
    }

    /// Last-known-good value.
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Error of the latest completed fetch, if it failed.
    pub const fn error(&self) -> Option<&SourceError> {
        self.error.as_ref()
    }

    /// Whether a fetch is outstanding.
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Latest issued generation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Observable state.
    pub const fn state(&self) -> SourceState {
        match (&self.value, &self.error) {
            (Some(_), _) => SourceState::Resolved,
            (None, Some(_)) => SourceState::Failed,
            (None, None) => SourceState::Pending,
        }
    }
}

/// Tracks upstream sources and keeps the derived snapshot current.
///
/// Each source keeps its last-known-good value, so refreshing one source
/// never sends an already complete snapshot back to loading.
#[derive(Debug)]
pub struct SnapshotOrchestrator {
    settings: SnapshotSettings,
    income: SourceSlot<Vec<IncomeSource>>,
    obligations: SourceSlot<Vec<Obligation>>,
    categories: SourceSlot<Vec<BudgetCategory>>,
    subscriptions: SourceSlot<Vec<Subscription>>,
    expenses: SourceSlot<Vec<Expense>>,
    market: SourceSlot<MarketRates>,
    snapshot: Option<Snapshot>,
    compute_error: Option<IncomeError>,
    revision: u64,
}

impl SnapshotOrchestrator {
    /// Creates an orchestrator with every source pending.
    #[must_use]
    pub fn new(settings: SnapshotSettings) -> Self {
        Self {
            settings,
            income: SourceSlot::default(),
            obligations: SourceSlot::default(),
            categories: SourceSlot::default(),
            subscriptions: SourceSlot::default(),
            expenses: SourceSlot::default(),
            market: SourceSlot::default(),
            snapshot: None,
            compute_error: None,
            revision: 0,
        }
    }

    /// Starts a fetch of `source`.
    pub fn begin(&mut self, source: SourceKind) -> Generation {
        let value = match source {
            SourceKind::Income => self.income.begin(),
            SourceKind::Obligations => self.obligations.begin(),
            SourceKind::Categories => self.categories.begin(),
            SourceKind::Subscriptions => self.subscriptions.begin(),
            SourceKind::Expenses => self.expenses.begin(),
            SourceKind::MarketRates => self.market.begin(),
        };
        debug!(%source, generation = value, "Source fetch started");
        Generation { source, value }
    }

    /// Delivers the outcome of a fetch started with [`Self::begin`].
    ///
    /// Stale completions are discarded. A failure keeps the previous value.
    /// The snapshot is recomputed only when a value was applied.
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<SourceData, SourceError>,
    ) -> Completion {
        let source = generation.source;
        if let Ok(data) = &result
            && data.kind() != source
        {
            warn!(%source, delivered = %data.kind(), "Completion delivered data for another source");
            return Completion::Stale;
        }

        let g = generation.value;
        let completion = match result {
            Ok(SourceData::Income(v)) => self.income.complete(g, Ok(v)),
            Ok(SourceData::Obligations(v)) => self.obligations.complete(g, Ok(v)),
            Ok(SourceData::Categories(v)) => self.categories.complete(g, Ok(v)),
            Ok(SourceData::Subscriptions(v)) => self.subscriptions.complete(g, Ok(v)),
            Ok(SourceData::Expenses(v)) => self.expenses.complete(g, Ok(v)),
            Ok(SourceData::MarketRates(v)) => self.market.complete(g, Ok(v)),
            Err(e) => match source {
                SourceKind::Income => self.income.complete(g, Err(e)),
                SourceKind::Obligations => self.obligations.complete(g, Err(e)),
                SourceKind::Categories => self.categories.complete(g, Err(e)),
                SourceKind::Subscriptions => self.subscriptions.complete(g, Err(e)),
                SourceKind::Expenses => self.expenses.complete(g, Err(e)),
                SourceKind::MarketRates => self.market.complete(g, Err(e)),
            },
        };

        match completion {
            Completion::Stale => {
                warn!(%source, generation = g, "Discarding stale completion");
            }
            Completion::Failed => {
                warn!(%source, generation = g, "Source fetch failed, keeping last known value");
            }
            Completion::Applied => {
                if source != SourceKind::MarketRates {
                    self.recompute();
                }
            }
        }
        completion
    }

    /// Moves the snapshot date, recomputing if it changed.
    pub fn set_as_of(&mut self, as_of: NaiveDate) {
        if self.settings.as_of != as_of {
            self.settings.as_of = as_of;
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let inputs = SnapshotInputs {
            income_sources: self.income.value().map(Vec::as_slice),
            obligations: self.obligations.value().map(Vec::as_slice),
            categories: self.categories.value().map(Vec::as_slice),
            subscriptions: self.subscriptions.value().map(Vec::as_slice),
            expenses: self.expenses.value().map(Vec::as_slice),
        };
        match SnapshotCalculator::compute(&inputs, &self.settings) {
            Ok(Some(snapshot)) => {
                self.snapshot = Some(snapshot);
                self.compute_error = None;
                self.revision += 1;
                debug!(revision = self.revision, "Snapshot updated");
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Snapshot recomputation failed");
                self.snapshot = None;
                self.compute_error = Some(e);
            }
        }
    }

    /// Current snapshot; `None` until every required source has resolved.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Why the last recomputation failed, if it did.
    #[must_use]
    pub const fn compute_error(&self) -> Option<&IncomeError> {
        self.compute_error.as_ref()
    }

    /// Number of successful recomputations so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Overall readiness.
    #[must_use]
    pub fn status(&self) -> SnapshotStatus {
        if self.snapshot.is_some() {
            return SnapshotStatus::Ready;
        }
        if self.compute_error.is_some() {
            return SnapshotStatus::Unavailable;
        }
        let failed = SourceKind::REQUIRED
            .iter()
            .any(|s| self.source_state(*s) == SourceState::Failed);
        if failed {
            SnapshotStatus::Unavailable
        } else {
            SnapshotStatus::Loading
        }
    }

    /// State of one source.
    #[must_use]
    pub const fn source_state(&self, source: SourceKind) -> SourceState {
        match source {
            SourceKind::Income => self.income.state(),
            SourceKind::Obligations => self.obligations.state(),
            SourceKind::Categories => self.categories.state(),
            SourceKind::Subscriptions => self.subscriptions.state(),
            SourceKind::Expenses => self.expenses.state(),
            SourceKind::MarketRates => self.market.state(),
        }
    }

    /// Monthly income as soon as income resolved, independently of the other sources.
    #[must_use]
    pub fn income_total(&self) -> Option<Decimal> {
        let sources = self.income.value()?;
        IncomeAggregator::new(self.settings.on_unknown_frequency)
            .total_monthly_income(sources)
            .ok()
    }

    /// Resolved income sources.
    #[must_use]
    pub fn income_sources(&self) -> Option<&[IncomeSource]> {
        self.income.value().map(Vec::as_slice)
    }

    /// Resolved obligations.
    #[must_use]
    pub fn obligations(&self) -> Option<&[Obligation]> {
        self.obligations.value().map(Vec::as_slice)
    }

    /// Resolved market rates.
    #[must_use]
    pub const fn market_rates(&self) -> Option<&MarketRates> {
        self.market.value()
    }

    /// Per-obligation metrics, once obligations resolved.
    #[must_use]
    pub fn summaries(&self) -> Option<Vec<ObligationSummary>> {
        let obligations = self.obligations.value()?;
        Some(
            obligations
                .iter()
                .map(|o| {
                    LedgerService::summarize(
                        o,
                        self.settings.as_of,
                        self.market.value(),
                        self.settings.projection_horizon_months,
                    )
                })
                .collect(),
        )
    }

    /// Evaluates insight rules once income and obligations resolved.
    #[must_use]
    pub fn insights(&self, engine: &InsightEngine) -> Option<Vec<InsightRecord>> {
        let inputs = InsightInputs {
            income_sources: self.income.value()?,
            obligations: self.obligations.value()?,
            market_rates: self.market.value(),
            as_of: self.settings.as_of,
            projection_horizon_months: self.settings.projection_horizon_months,
        };
        Some(engine.evaluate(&inputs))
    }
}
