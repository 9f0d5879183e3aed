//! Moneta API Server
//!
//! Main entry point for the Moneta planning service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moneta_api::{
    AppState, HttpEnrichmentClient, PlannerService, create_router, spawn_ledger_listener,
};
use moneta_core::insight::EnrichmentService;
use moneta_core::market::{MarketRates, StaticRateProvider};
use moneta_db::Repositories;
use moneta_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moneta=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        timezone = %config.planner.timezone,
        currency = ?config.planner.currency,
        "Configuration loaded"
    );

    let repos = Repositories::in_memory();
    let market = Arc::new(StaticRateProvider::new(MarketRates::from(&config.market)));

    let enrichment = HttpEnrichmentClient::from_config(&config.enrichment)
        .map(|client| Arc::new(client) as Arc<dyn EnrichmentService>);
    info!(enabled = enrichment.is_some(), "Insight enrichment configured");

    let planner = Arc::new(PlannerService::new(&config, repos, market, enrichment));
    let status = planner.refresh_all().await;
    info!(?status, "Initial snapshot computed");
    let _listener = spawn_ledger_listener(Arc::clone(&planner));

    // Create router
    let app = create_router(AppState::new(planner));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
