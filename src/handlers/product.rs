// src/handlers/product.rs
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use crate::dtos::envelope::ApiResponse;
use crate::dtos::product::{ProductRequest, ProductResponse};
use crate::error::AppError;
use crate::handlers::parse_id;
use crate::state::AppState;
use tracing::{info, instrument};

// GET /products - List all products
#[instrument(skip(store))]
pub async fn get_products(
    State(AppState { store }): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, AppError> {
    let products = store.list_products().await?;

    Ok(Json(ApiResponse::new(
        "Get Product successfully",
        products.into_iter().map(ProductResponse::from).collect(),
    )))
}

// GET /products/{id} - Get single product
#[instrument(skip(store))]
pub async fn get_product(
    Path(id): Path<String>,
    State(AppState { store }): State<AppState>,
) -> Result<Json<ApiResponse<ProductResponse>>, AppError> {
    let id = parse_id(&id, "product")?;

    let product = store
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ApiResponse::new("Get Product by ID successfully", product.into())))
}

// POST /products - Create new product
#[instrument(skip(store, payload))]
pub async fn create_product(
    State(AppState { store }): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), AppError> {
    let Json(payload) = payload?;
    let product = store.create_product(payload.into_fields()?).await?;
    info!(product_id = product.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Product created successfully", product.into())),
    ))
}

// PUT /products/{id} - Replace product fields
#[instrument(skip(store, payload))]
pub async fn update_product(
    Path(id): Path<String>,
    State(AppState { store }): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProductResponse>>, AppError> {
    let id = parse_id(&id, "product")?;
    let Json(payload) = payload?;

    let product = store
        .update_product(id, payload.into_fields()?)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ApiResponse::new("Update Product successfully", product.into())))
}

// DELETE /products/{id} - Delete product; unknown ids still answer 204
#[instrument(skip(store))]
pub async fn delete_product(
    Path(id): Path<String>,
    State(AppState { store }): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "product")?;

    let deleted = store.delete_product(id).await?;
    info!(product_id = id, deleted, "Product delete");

    Ok(StatusCode::NO_CONTENT)
}
