// src/dtos/order.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::order::Order;
use crate::services::order::OrderDraft;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(alias = "customerId")]
    pub customer_id: i64,
    #[serde(alias = "productId")]
    pub product_id: i64,
    pub quantity: i64,
}

impl From<CreateOrderRequest> for OrderDraft {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            product_id: req.product_id,
            quantity: req.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            product_id: order.product_id,
            quantity: order.quantity,
            total: order.total,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
