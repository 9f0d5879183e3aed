//! Income source routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use serde_json::json;
use uuid::Uuid;

use moneta_core::snapshot::SourceKind;
use moneta_db::repositories::{CreateIncomeSourceInput, UpdateIncomeSourceInput};
use moneta_shared::types::IncomeSourceId;

use crate::{AppState, error::ApiResult};

/// Creates the income routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/income", get(list_income).post(create_income))
        .route("/income/{id}", patch(update_income).delete(delete_income))
}

/// GET `/income` - List income sources with the current monthly total.
async fn list_income(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let sources = state.repos.income.list().await?;
    let view = state.planner.snapshot().await;
    let monthly_total = view.snapshot.map(|s| s.income_total);
    Ok(Json(json!({
        "income_sources": sources,
        "monthly_total": monthly_total,
    })))
}

/// POST `/income` - Create an income source.
async fn create_income(
    State(state): State<AppState>,
    Json(payload): Json<CreateIncomeSourceInput>,
) -> ApiResult<impl IntoResponse> {
    let source = state.repos.income.create(payload).await?;
    state.planner.refresh(SourceKind::Income).await;
    Ok((StatusCode::CREATED, Json(source)))
}

/// PATCH `/income/{id}` - Update an income source.
async fn update_income(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateIncomeSourceInput>,
) -> ApiResult<impl IntoResponse> {
    let source = state
        .repos
        .income
        .update(IncomeSourceId::from_uuid(id), payload)
        .await?;
    state.planner.refresh(SourceKind::Income).await;
    Ok(Json(source))
}

/// DELETE `/income/{id}` - Delete an income source.
async fn delete_income(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .repos
        .income
        .delete(IncomeSourceId::from_uuid(id))
        .await?;
    state.planner.refresh(SourceKind::Income).await;
    Ok(StatusCode::NO_CONTENT)
}
