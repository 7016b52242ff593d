// src/handlers/customer.rs
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use crate::dtos::customer::{CustomerRequest, CustomerResponse};
use crate::dtos::envelope::ApiResponse;
use crate::error::AppError;
use crate::handlers::parse_id;
use crate::state::AppState;
use tracing::{info, instrument};

#[instrument(skip(store))]
pub async fn list_customers(
    State(AppState { store }): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CustomerResponse>>>, AppError> {
    let customers = store.list_customers().await?;

    Ok(Json(ApiResponse::new(
        "Get Customer successfully",
        customers.into_iter().map(CustomerResponse::from).collect(),
    )))
}

#[instrument(skip(store))]
pub async fn get_customer(
    Path(id): Path<String>,
    State(AppState { store }): State<AppState>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let id = parse_id(&id, "customer")?;

    let customer = store
        .get_customer(id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(ApiResponse::new("Get Customer by ID successfully", customer.into())))
}

#[instrument(skip(store, payload))]
pub async fn create_customer(
    State(AppState { store }): State<AppState>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponse>>), AppError> {
    let Json(req) = payload?;
    let customer = store.create_customer(req.into()).await?;
    info!(customer_id = customer.id, "Customer created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Customer created successfully", customer.into())),
    ))
}

#[instrument(skip(store, payload))]
pub async fn update_customer(
    Path(id): Path<String>,
    State(AppState { store }): State<AppState>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let id = parse_id(&id, "customer")?;
    let Json(req) = payload?;

    let customer = store
        .update_customer(id, req.into())
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(ApiResponse::new("Update Customer successfully", customer.into())))
}

#[instrument(skip(store))]
pub async fn delete_customer(
    Path(id): Path<String>,
    State(AppState { store }): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "customer")?;

    let deleted = store.delete_customer(id).await?;
    info!(customer_id = id, deleted, "Customer delete");

    Ok(StatusCode::NO_CONTENT)
}
