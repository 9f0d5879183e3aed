//! Planner service: wires repositories, market rates and enrichment into the
//! snapshot orchestrator.
//!
//! Fetches run outside the orchestrator lock. Each one is tagged with the
//! generation handed out by `begin`, so a slow fetch that finishes after a
//! newer one is discarded instead of overwriting fresher data.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use moneta_core::insight::{
    EnrichedInsights, EnrichmentContext, EnrichmentService, InsightEngine, InsightThresholds,
    enrich,
};
use moneta_core::ledger::{LedgerEvent, ObligationSummary};
use moneta_core::market::MarketRateProvider;
use moneta_core::projection::{
    ProjectionCache, ProjectionEngine, ProjectionParams, ProjectionResult,
};
use moneta_core::snapshot::{
    Completion, Snapshot, SnapshotOrchestrator, SnapshotSettings, SnapshotStatus, SourceData,
    SourceError, SourceKind, SourceState,
};
use moneta_db::Repositories;
use moneta_shared::AppError;
use moneta_shared::config::{AppConfig, PlannerConfig};

use crate::error::ApiError;

/// Every source, in fetch order.
const ALL_SOURCES: [SourceKind; 6] = [
    SourceKind::Income,
    SourceKind::Obligations,
    SourceKind::Categories,
    SourceKind::Subscriptions,
    SourceKind::Expenses,
    SourceKind::MarketRates,
];

/// State of one upstream source, as reported to clients.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    /// Source.
    pub source: SourceKind,
    /// Pending, resolved or failed.
    pub state: SourceState,
}

/// Snapshot plus its readiness.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotView {
    /// Overall readiness.
    pub status: SnapshotStatus,
    /// Recomputation counter.
    pub revision: u64,
    /// Snapshot, once every required source resolved.
    pub snapshot: Option<Snapshot>,
    /// Why the snapshot could not be computed.
    pub error: Option<String>,
    /// Per-source state.
    pub sources: Vec<SourceStatus>,
}

/// Aggregation service shared by every handler.
pub struct PlannerService {
    repos: Repositories,
    market: Arc<dyn MarketRateProvider>,
    enrichment: Option<Arc<dyn EnrichmentService>>,
    orchestrator: Mutex<SnapshotOrchestrator>,
    insights: InsightEngine,
    projections: ProjectionCache,
    config: PlannerConfig,
    enrichment_timeout: Duration,
}

impl PlannerService {
    /// Creates the service. Nothing is fetched until [`Self::refresh_all`].
    pub fn new(
        config: &AppConfig,
        repos: Repositories,
        market: Arc<dyn MarketRateProvider>,
        enrichment: Option<Arc<dyn EnrichmentService>>,
    ) -> Self {
        let planner = config.planner.clone();
        let settings = SnapshotSettings {
            as_of: planner.today(),
            currency: planner.currency,
            on_unknown_frequency: planner.on_unknown_frequency,
            projection_horizon_months: planner.projection_horizon_months,
        };
        Self {
            repos,
            market,
            enrichment,
            orchestrator: Mutex::new(SnapshotOrchestrator::new(settings)),
            insights: InsightEngine::new(InsightThresholds::from(&config.insights)),
            projections: ProjectionCache::with_config(
                planner.projection_cache_capacity,
                planner.projection_cache_ttl_secs,
            ),
            enrichment_timeout: Duration::from_millis(config.enrichment.timeout_ms),
            config: planner,
        }
    }

    /// Today in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    /// Shared repositories.
    pub const fn repos(&self) -> &Repositories {
        &self.repos
    }

    /// Refetches every source concurrently.
    pub async fn refresh_all(&self) -> SnapshotStatus {
        let generations = {
            let mut orchestrator = self.orchestrator.lock().await;
            orchestrator.set_as_of(self.today());
            ALL_SOURCES.map(|kind| orchestrator.begin(kind))
        };

        let (income, obligations, categories, subscriptions, expenses, market) = tokio::join!(
            self.fetch(SourceKind::Income),
            self.fetch(SourceKind::Obligations),
            self.fetch(SourceKind::Categories),
            self.fetch(SourceKind::Subscriptions),
            self.fetch(SourceKind::Expenses),
            self.fetch(SourceKind::MarketRates),
        );
        let results = [income, obligations, categories, subscriptions, expenses, market];

        let mut orchestrator = self.orchestrator.lock().await;
        for (generation, result) in generations.into_iter().zip(results) {
            orchestrator.complete(generation, result);
        }
        let status = orchestrator.status();
        info!(?status, revision = orchestrator.revision(), "Planner refreshed");
        status
    }

    /// Refetches one source, typically after a mutation.
    pub async fn refresh(&self, kind: SourceKind) -> Completion {
        let generation = {
            let mut orchestrator = self.orchestrator.lock().await;
            orchestrator.set_as_of(self.today());
            orchestrator.begin(kind)
        };
        let result = self.fetch(kind).await;
        let completion = self.orchestrator.lock().await.complete(generation, result);
        debug!(source = %kind, ?completion, "Source refreshed");
        completion
    }

    async fn fetch(&self, kind: SourceKind) -> Result<SourceData, SourceError> {
        let fail = |e: &dyn std::fmt::Display| SourceError::new(kind, e.to_string());
        match kind {
            SourceKind::Income => self
                .repos
                .income
                .list()
                .await
                .map(SourceData::Income)
                .map_err(|e| fail(&e)),
            SourceKind::Obligations => self
                .repos
                .obligations
                .list()
                .await
                .map(SourceData::Obligations)
                .map_err(|e| fail(&e)),
            SourceKind::Categories => self
                .repos
                .budget
                .list_categories()
                .await
                .map(SourceData::Categories)
                .map_err(|e| fail(&e)),
            SourceKind::Subscriptions => self
                .repos
                .budget
                .list_subscriptions()
                .await
                .map(SourceData::Subscriptions)
                .map_err(|e| fail(&e)),
            SourceKind::Expenses => self
                .repos
                .budget
                .list_expenses()
                .await
                .map(SourceData::Expenses)
                .map_err(|e| fail(&e)),
            SourceKind::MarketRates => self
                .market
                .current_rates()
                .await
                .map(SourceData::MarketRates)
                .map_err(|e| fail(&e)),
        }
    }

    /// Current snapshot and the state of every source.
    pub async fn snapshot(&self) -> SnapshotView {
        let orchestrator = self.orchestrator.lock().await;
        SnapshotView {
            status: orchestrator.status(),
            revision: orchestrator.revision(),
            snapshot: orchestrator.snapshot().copied(),
            error: orchestrator.compute_error().map(ToString::to_string),
            sources: ALL_SOURCES
                .iter()
                .map(|&source| SourceStatus {
                    source,
                    state: orchestrator.source_state(source),
                })
                .collect(),
        }
    }

    /// Per-obligation metrics.
    pub async fn summaries(&self) -> Result<Vec<ObligationSummary>, ApiError> {
        self.orchestrator
            .lock()
            .await
            .summaries()
            .ok_or_else(|| unavailable(SourceKind::Obligations))
    }

    /// Ranked insights, with narrative text when enrichment answers in time.
    pub async fn insights(&self) -> Result<EnrichedInsights, ApiError> {
        let context = {
            let orchestrator = self.orchestrator.lock().await;
            let insights = orchestrator
                .insights(&self.insights)
                .ok_or_else(|| unavailable(SourceKind::Income))?;
            EnrichmentContext {
                snapshot: orchestrator.snapshot().copied(),
                insights,
            }
        };
        Ok(enrich(self.enrichment.as_deref(), context, self.enrichment_timeout).await)
    }

    /// Runs a projection through the cache on the blocking pool.
    ///
    /// Horizons longer than `projection_horizon_months` are rejected.
    pub async fn project(&self, params: ProjectionParams) -> Result<ProjectionResult, ApiError> {
        let max_months = self.config.projection_horizon_months;
        ProjectionEngine::check_horizon(params.months, max_months)?;

        let cache = self.projections.clone();
        let policy = self.config.negative_projection_inputs;
        let result = tokio::task::spawn_blocking(move || {
            cache.compute_cached(&params, policy, max_months)
        })
        .await
        .map_err(|e| ApiError(AppError::Internal(format!("projection task failed: {e}"))))?;
        Ok(result?)
    }
}

fn unavailable(source: SourceKind) -> ApiError {
    ApiError(AppError::Unavailable(format!(
        "waiting for {source} to resolve"
    )))
}

/// Listens for ledger events and refreshes obligations when a debt settles.
pub fn spawn_ledger_listener(planner: Arc<PlannerService>) -> JoinHandle<()> {
    let mut events = planner.repos.obligations.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(LedgerEvent::DebtSettled {
                    debt_id,
                    settled_on,
                }) => {
                    info!(%debt_id, %settled_on, "Debt settled");
                    planner.refresh(SourceKind::Obligations).await;
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Ledger listener lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use moneta_core::income::Frequency;
    use moneta_core::market::{MarketRateError, MarketRates, StaticRateProvider};
    use moneta_db::repositories::CreateIncomeSourceInput;
    use rust_decimal_macros::dec;

    struct DownProvider;

    #[async_trait]
    impl MarketRateProvider for DownProvider {
        async fn current_rates(&self) -> Result<MarketRates, MarketRateError> {
            Err(MarketRateError("feed offline".to_string()))
        }
    }

    fn planner(market: Arc<dyn MarketRateProvider>) -> PlannerService {
        PlannerService::new(&AppConfig::default(), Repositories::in_memory(), market, None)
    }

    fn static_rates() -> Arc<dyn MarketRateProvider> {
        Arc::new(StaticRateProvider::new(MarketRates {
            reference_annual_rate: dec!(0.10),
            asset_annual_return: None,
        }))
    }

    #[tokio::test]
    async fn test_snapshot_loading_before_refresh() {
        let planner = planner(static_rates());
        let view = planner.snapshot().await;
        assert_eq!(view.status, SnapshotStatus::Loading);
        assert!(view.snapshot.is_none());
        assert!(planner.insights().await.is_err());
    }

    #[tokio::test]
    async fn test_refresh_all_makes_snapshot_ready() {
        let planner = planner(static_rates());
        planner
            .repos()
            .income
            .create(CreateIncomeSourceInput {
                name: "Salary".to_string(),
                amount: dec!(3000),
                frequency: Frequency::Monthly.as_str().to_string(),
            })
            .await
            .unwrap();

        assert_eq!(planner.refresh_all().await, SnapshotStatus::Ready);
        let view = planner.snapshot().await;
        let snapshot = view.snapshot.unwrap();
        assert_eq!(snapshot.income_total, dec!(3000));
        assert_eq!(snapshot.free_balance, dec!(3000));
    }

    #[tokio::test]
    async fn test_market_outage_does_not_block_snapshot() {
        let planner = planner(Arc::new(DownProvider));
        assert_eq!(planner.refresh_all().await, SnapshotStatus::Ready);
        let view = planner.snapshot().await;
        let market = view
            .sources
            .iter()
            .find(|s| s.source == SourceKind::MarketRates)
            .unwrap();
        assert_eq!(market.state, SourceState::Failed);
    }

    #[tokio::test]
    async fn test_refresh_single_source_applies() {
        let planner = planner(static_rates());
        planner.refresh_all().await;
        let revision = planner.snapshot().await.revision;

        planner
            .repos()
            .income
            .create(CreateIncomeSourceInput {
                name: "Rent".to_string(),
                amount: dec!(800),
                frequency: "monthly".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(planner.refresh(SourceKind::Income).await, Completion::Applied);

        let view = planner.snapshot().await;
        assert!(view.revision > revision);
        assert_eq!(view.snapshot.unwrap().income_total, dec!(800));
    }

    #[tokio::test]
    async fn test_single_income_source_yields_neutral_insight() {
        let planner = planner(static_rates());
        planner
            .repos()
            .income
            .create(CreateIncomeSourceInput {
                name: "Salary".to_string(),
                amount: dec!(3000),
                frequency: "monthly".to_string(),
            })
            .await
            .unwrap();
        planner.refresh_all().await;

        let enriched = planner.insights().await.unwrap();
        assert_eq!(enriched.insights.len(), 1);
        assert_eq!(enriched.insights[0].id, "income-1");
        assert!(enriched.narrative.is_none());
    }

    #[tokio::test]
    async fn test_projection_is_cached() {
        let planner = planner(static_rates());
        let params = ProjectionParams {
            initial_amount: dec!(1000),
            monthly_amount: dec!(100),
            months: 12,
            annual_rate: dec!(0),
            asset_annual_return: None,
        };
        let first = planner.project(params.clone()).await.unwrap();
        assert!(!first.cached);
        let second = planner.project(params).await.unwrap();
        assert!(second.cached);
        assert_eq!(first.series, second.series);
    }

    #[tokio::test]
    async fn test_projection_beyond_horizon_is_rejected() {
        let planner = planner(static_rates());
        let params = ProjectionParams {
            initial_amount: dec!(1000),
            monthly_amount: dec!(100),
            months: 5_000_000_000,
            annual_rate: dec!(0.1),
            asset_annual_return: None,
        };
        let err = planner.project(params).await.unwrap_err();
        assert_eq!(err.0.status_code(), 400);
    }

    #[tokio::test]
    async fn test_single_refresh_moves_to_today() {
        let planner = planner(static_rates());
        planner.refresh_all().await;
        let yesterday = planner.today().pred_opt().unwrap();
        planner.orchestrator.lock().await.set_as_of(yesterday);
        assert_eq!(planner.snapshot().await.snapshot.unwrap().as_of, yesterday);

        planner.refresh(SourceKind::Income).await;
        let snapshot = planner.snapshot().await.snapshot.unwrap();
        assert_eq!(snapshot.as_of, planner.today());
    }
}
