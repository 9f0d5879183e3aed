//! Goal, debt and investment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use moneta_core::ledger::{NewDebt, NewGoal, NewInvestment};
use moneta_core::snapshot::SourceKind;
use moneta_shared::types::{InstallmentId, ObligationId};

use crate::{AppState, error::ApiResult};

/// Creates the obligation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/obligations", get(list_obligations))
        .route("/obligations/summaries", get(list_summaries))
        .route(
            "/obligations/{id}",
            get(get_obligation).delete(delete_obligation),
        )
        .route("/obligations/{id}/contributions", post(contribute))
        .route("/goals", post(create_goal))
        .route("/debts", post(create_debt))
        .route("/investments", post(create_investment))
        .route(
            "/debts/{debt_id}/installments/{installment_id}/settle",
            post(settle_installment),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for recording a contribution.
#[derive(Debug, Deserialize)]
pub struct ContributionRequest {
    /// Amount added to the current balance.
    pub amount: Decimal,
}

/// Query parameters for settling an installment.
#[derive(Debug, Default, Deserialize)]
pub struct SettleParams {
    /// Payment date; defaults to today.
    #[serde(default)]
    pub paid_on: Option<NaiveDate>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/obligations` - List goals, debts and investments.
async fn list_obligations(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let obligations = state.repos.obligations.list().await?;
    Ok(Json(json!({ "obligations": obligations })))
}

/// GET `/obligations/summaries` - Progress, pace and months-to-target per obligation.
async fn list_summaries(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let summaries = state.planner.summaries().await?;
    Ok(Json(json!({ "summaries": summaries })))
}

/// GET `/obligations/{id}` - Fetch one obligation.
async fn get_obligation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let obligation = state
        .repos
        .obligations
        .get(ObligationId::from_uuid(id))
        .await?;
    Ok(Json(obligation))
}

/// DELETE `/obligations/{id}` - Delete an obligation.
async fn delete_obligation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .repos
        .obligations
        .delete(ObligationId::from_uuid(id))
        .await?;
    state.planner.refresh(SourceKind::Obligations).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/obligations/{id}/contributions` - Add to a goal or investment.
async fn contribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContributionRequest>,
) -> ApiResult<impl IntoResponse> {
    let obligation = state
        .repos
        .obligations
        .contribute(ObligationId::from_uuid(id), payload.amount)
        .await?;
    state.planner.refresh(SourceKind::Obligations).await;
    Ok(Json(obligation))
}

/// POST `/goals` - Create a goal.
async fn create_goal(
    State(state): State<AppState>,
    Json(payload): Json<NewGoal>,
) -> ApiResult<impl IntoResponse> {
    let goal = state
        .repos
        .obligations
        .create_goal(payload, state.planner.today())
        .await?;
    state.planner.refresh(SourceKind::Obligations).await;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// POST `/debts` - Create a debt with its full installment plan.
async fn create_debt(
    State(state): State<AppState>,
    Json(payload): Json<NewDebt>,
) -> ApiResult<impl IntoResponse> {
    let debt = state
        .repos
        .obligations
        .create_debt(payload, state.planner.today())
        .await?;
    state.planner.refresh(SourceKind::Obligations).await;
    Ok((StatusCode::CREATED, Json(debt)))
}

/// POST `/investments` - Create an investment.
async fn create_investment(
    State(state): State<AppState>,
    Json(payload): Json<NewInvestment>,
) -> ApiResult<impl IntoResponse> {
    let investment = state
        .repos
        .obligations
        .create_investment(payload, state.planner.today())
        .await?;
    state.planner.refresh(SourceKind::Obligations).await;
    Ok((StatusCode::CREATED, Json(investment)))
}

/// POST `/debts/{debt_id}/installments/{installment_id}/settle` - Pay one installment.
///
/// `?paid_on=YYYY-MM-DD` overrides the payment date.
async fn settle_installment(
    State(state): State<AppState>,
    Path((debt_id, installment_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<SettleParams>,
) -> ApiResult<impl IntoResponse> {
    let paid_on = params.paid_on.unwrap_or_else(|| state.planner.today());
    let settlement = state
        .repos
        .obligations
        .settle_installment(
            ObligationId::from_uuid(debt_id),
            InstallmentId::from_uuid(installment_id),
            paid_on,
        )
        .await?;
    state.planner.refresh(SourceKind::Obligations).await;
    Ok(Json(json!({
        "installment": settlement.installment,
        "debt_settled": settlement.debt_settled,
    })))
}
