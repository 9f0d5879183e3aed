//! End-to-end tests of the HTTP API over in-memory repositories.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use moneta_api::{AppState, PlannerService, create_router};
use moneta_core::market::{MarketRates, StaticRateProvider};
use moneta_db::Repositories;
use moneta_shared::AppConfig;

async fn app() -> Router {
    let rates = StaticRateProvider::new(MarketRates {
        reference_annual_rate: dec!(0.12),
        asset_annual_return: None,
    });
    let planner = Arc::new(PlannerService::new(
        &AppConfig::default(),
        Repositories::in_memory(),
        Arc::new(rates),
        None,
    ));
    planner.refresh_all().await;
    create_router(AppState::new(planner))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["snapshot"], "ready");
}

#[tokio::test]
async fn test_reference_scenario_balances() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/income",
        Some(json!({"name": "Salary", "amount": "5000", "frequency": "monthly"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/categories",
        Some(json!({"title": "Rent", "limit_amount": "1500", "is_fixed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, category) = send(
        &app,
        "POST",
        "/api/v1/categories",
        Some(json!({"title": "Groceries", "limit_amount": "800"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    send(
        &app,
        "POST",
        "/api/v1/expenses",
        Some(json!({
            "category_id": category["id"],
            "amount": "300",
            "date": chrono::Utc::now().date_naive(),
        })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/v1/snapshot", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(decimal(&body["snapshot"]["income_total"]), dec!(5000));
    assert_eq!(decimal(&body["snapshot"]["fixed_expense_total"]), dec!(1500));
    assert_eq!(decimal(&body["snapshot"]["variable_planned"]), dec!(800));
    assert_eq!(decimal(&body["snapshot"]["variable_used"]), dec!(300));
    assert_eq!(decimal(&body["snapshot"]["variable_remaining"]), dec!(500));
}

#[tokio::test]
async fn test_debt_lifecycle() {
    let app = app().await;

    let (status, debt) = send(
        &app,
        "POST",
        "/api/v1/debts",
        Some(json!({
            "title": "Laptop",
            "installments_count": 2,
            "installment_amount": "600",
            "first_due_date": "2025-01-10",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let debt_id = debt["header"]["id"].as_str().unwrap().to_string();
    let installments = debt["installments"].as_array().unwrap().clone();
    assert_eq!(installments.len(), 2);
    assert_eq!(installments[1]["due_date"], "2025-02-10");

    let first = installments[0]["id"].as_str().unwrap();
    let uri = format!("/api/v1/debts/{debt_id}/installments/{first}/settle");
    let (status, body) = send(&app, "POST", &format!("{uri}?paid_on=2025-01-10"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["debt_settled"], false);

    let (status, body) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, body) = send(&app, "GET", &format!("/api/v1/obligations/{debt_id}"), None).await;
    assert_eq!(decimal(&body["header"]["current_amount"]), dec!(600));

    let (status, body) = send(&app, "GET", "/api/v1/obligations/summaries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["summaries"][0]["progress_percent"]), dec!(50));
}

#[tokio::test]
async fn test_invalid_debt_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/debts",
        Some(json!({
            "title": "Broken",
            "installments_count": 0,
            "installment_amount": "100",
            "first_due_date": "2025-01-10",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, body) = send(&app, "GET", "/api/v1/obligations", None).await;
    assert_eq!(body["obligations"], json!([]));
}

#[tokio::test]
async fn test_foreign_installment_is_business_rule_violation() {
    let app = app().await;
    let new_debt = json!({
        "title": "Phone",
        "installments_count": 1,
        "installment_amount": "300",
        "first_due_date": "2025-03-01",
    });
    let (_, a) = send(&app, "POST", "/api/v1/debts", Some(new_debt.clone())).await;
    let (_, b) = send(&app, "POST", "/api/v1/debts", Some(new_debt)).await;

    let uri = format!(
        "/api/v1/debts/{}/installments/{}/settle",
        a["header"]["id"].as_str().unwrap(),
        b["installments"][0]["id"].as_str().unwrap()
    );
    let (status, body) = send(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");
}

#[tokio::test]
async fn test_unknown_frequency_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/income",
        Some(json!({"name": "Gig", "amount": "100", "frequency": "fortnightly-ish"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_insights_flag_missing_income() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/insights", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["insights"][0]["id"], "income-0");
    assert_eq!(body["insights"][0]["severity"], "danger");
    assert_eq!(body["narrative"], Value::Null);
}

#[tokio::test]
async fn test_projection_endpoint() {
    let app = app().await;
    let params = json!({
        "initial_amount": "1000",
        "monthly_amount": "100",
        "months": 3,
        "annual_rate": "0",
    });
    let (status, body) = send(&app, "POST", "/api/v1/projections", Some(params.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["series"].as_array().unwrap().len(), 3);
    assert_eq!(body["cached"], false);

    let (_, body) = send(&app, "POST", "/api/v1/projections", Some(params)).await;
    assert_eq!(body["cached"], true);
}

#[rstest]
#[case(600, StatusCode::OK)]
#[case(601, StatusCode::BAD_REQUEST)]
#[case(5_000_000_000_i64, StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn test_projection_horizon_is_bounded(#[case] months: i64, #[case] expected: StatusCode) {
    let app = app().await;
    let params = json!({
        "initial_amount": "1000",
        "monthly_amount": "100",
        "months": months,
        "annual_rate": "0.05",
    });
    let (status, body) = send(&app, "POST", "/api/v1/projections", Some(params)).await;
    assert_eq!(status, expected);
    if expected == StatusCode::BAD_REQUEST {
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_missing_obligation_is_not_found() {
    let app = app().await;
    let uri = format!("/api/v1/obligations/{}", uuid::Uuid::now_v7());
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
