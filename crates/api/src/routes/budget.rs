//! Budget category, subscription and expense routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde_json::json;
use uuid::Uuid;

use moneta_core::budget::{NewBudgetCategory, NewExpense, NewSubscription};
use moneta_core::snapshot::SourceKind;
use moneta_shared::types::{BudgetCategoryId, ExpenseId, SubscriptionId};

use crate::{AppState, error::ApiResult};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
        .route(
            "/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route("/subscriptions/{id}", delete(delete_subscription))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", delete(delete_expense))
}

// ============================================================================
// Categories
// ============================================================================

async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = state.repos.budget.list_categories().await?;
    Ok(Json(json!({ "categories": categories })))
}

async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<NewBudgetCategory>,
) -> ApiResult<impl IntoResponse> {
    let category = state.repos.budget.create_category(payload).await?;
    state.planner.refresh(SourceKind::Categories).await;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .repos
        .budget
        .delete_category(BudgetCategoryId::from_uuid(id))
        .await?;
    state.planner.refresh(SourceKind::Categories).await;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Subscriptions
// ============================================================================

async fn list_subscriptions(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let subscriptions = state.repos.budget.list_subscriptions().await?;
    Ok(Json(json!({ "subscriptions": subscriptions })))
}

async fn create_subscription(
    State(state): State<AppState>,
    Json(payload): Json<NewSubscription>,
) -> ApiResult<impl IntoResponse> {
    let subscription = state.repos.budget.create_subscription(payload).await?;
    state.planner.refresh(SourceKind::Subscriptions).await;
    Ok((StatusCode::CREATED, Json(subscription)))
}

async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .repos
        .budget
        .delete_subscription(SubscriptionId::from_uuid(id))
        .await?;
    state.planner.refresh(SourceKind::Subscriptions).await;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Expenses
// ============================================================================

async fn list_expenses(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let expenses = state.repos.budget.list_expenses().await?;
    Ok(Json(json!({ "expenses": expenses })))
}

async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<NewExpense>,
) -> ApiResult<impl IntoResponse> {
    let expense = state.repos.budget.create_expense(payload).await?;
    state.planner.refresh(SourceKind::Expenses).await;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .repos
        .budget
        .delete_expense(ExpenseId::from_uuid(id))
        .await?;
    state.planner.refresh(SourceKind::Expenses).await;
    Ok(StatusCode::NO_CONTENT)
}
