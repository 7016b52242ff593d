// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::product::{Product, ProductFields};

/// Body of both `POST /products` and `PUT /products/{id}`; updates replace every field.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

impl ProductRequest {
    pub fn into_fields(self) -> Result<ProductFields, AppError> {
        if self.price < 0.0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
        if self.stock < 0 {
            return Err(AppError::validation("Stock cannot be negative"));
        }
        Ok(ProductFields {
            name: self.name,
            price: self.price,
            stock: self.stock,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
