//! Snapshot, insight and projection routes.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};

use moneta_core::projection::ProjectionParams;

use crate::{AppState, error::ApiResult};

/// Creates the planning routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/snapshot", get(get_snapshot))
        .route("/snapshot/refresh", post(refresh_snapshot))
        .route("/insights", get(get_insights))
        .route("/projections", post(run_projection))
}

/// GET `/snapshot` - Current snapshot with per-source state.
///
/// Always answers 200; `status` tells whether the snapshot is ready.
async fn get_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.planner.snapshot().await)
}

/// POST `/snapshot/refresh` - Refetch every source.
async fn refresh_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    state.planner.refresh_all().await;
    Json(state.planner.snapshot().await)
}

/// GET `/insights` - Ranked insights plus optional narrative.
async fn get_insights(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.planner.insights().await?))
}

/// POST `/projections` - Month-by-month value projection.
async fn run_projection(
    State(state): State<AppState>,
    Json(params): Json<ProjectionParams>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.planner.project(params).await?))
}
