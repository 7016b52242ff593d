pub mod customers;
pub mod orders;
pub mod products;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(customers::routes())
        .merge(orders::routes())
}

/// Full application: resource routes, health check and middleware.
pub fn app(state: AppState) -> Router {
    create_router()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
