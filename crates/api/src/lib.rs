//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the ledger, income and budget repositories
//! - The planner service keeping the financial snapshot current
//! - An HTTP client for optional insight enrichment
//! - Error-to-response mapping

pub mod enrichment;
pub mod error;
pub mod planner;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use moneta_db::Repositories;

pub use enrichment::HttpEnrichmentClient;
pub use error::{ApiError, ApiResult};
pub use planner::{PlannerService, SnapshotView, spawn_ledger_listener};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repositories backing every mutation.
    pub repos: Repositories,
    /// Snapshot, insight and projection service.
    pub planner: Arc<PlannerService>,
}

impl AppState {
    /// Creates state sharing the planner's repositories.
    pub fn new(planner: Arc<PlannerService>) -> Self {
        Self {
            repos: planner.repos().clone(),
            planner,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
