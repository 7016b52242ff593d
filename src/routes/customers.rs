use axum::{routing::get, Router};
use crate::handlers::customer::{
    list_customers, get_customer, create_customer, update_customer, delete_customer
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/{id}", get(get_customer).put(update_customer).delete(delete_customer))
}
