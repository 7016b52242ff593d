// src/handlers/order.rs
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use crate::dtos::envelope::ApiResponse;
use crate::dtos::order::{CreateOrderRequest, OrderResponse};
use crate::error::AppError;
use crate::handlers::parse_id;
use crate::state::AppState;
use tracing::{info, instrument, warn};

// POST /orders - Validate references, compute total, persist
#[instrument(skip(store, payload))]
pub async fn create_order(
    State(AppState { store }): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), AppError> {
    let Json(req) = payload?;

    let order = store.place_order(req.into()).await.map_err(|e| {
        warn!(error = %e, "Order not created");
        AppError::from(e)
    })?;
    info!(order_id = order.id, total = order.total, "Order created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Order created successfully", order.into())),
    ))
}

// GET /orders/{id}
#[instrument(skip(store))]
pub async fn get_order(
    Path(id): Path<String>,
    State(AppState { store }): State<AppState>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let id = parse_id(&id, "order")?;

    let order = store
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    Ok(Json(ApiResponse::new("Get Order by ID successfully", order.into())))
}
