use axum::{routing::{get, post}, Router};
use crate::handlers::order::{create_order, get_order};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
}
