//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod budget;
pub mod health;
pub mod income;
pub mod obligations;
pub mod planning;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(income::routes())
        .merge(obligations::routes())
        .merge(budget::routes())
        .merge(planning::routes())
}
