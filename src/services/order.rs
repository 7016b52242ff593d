// src/services/order.rs
//! Order creation validation.
//!
//! An order may only be created for a product and a customer that exist at
//! creation time. The total is fixed here (`quantity * price`) and never
//! recomputed afterwards. Neither quantity positivity nor stock sufficiency
//! is checked, and stock is not decremented.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::customer::Customer;
use crate::models::product::Product;
use crate::store::StoreError;

/// Proposed order as received from a client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderDraft {
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

/// Order ready to be inserted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedOrder {
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderRejection {
    #[error("Product not found")]
    ProductNotFound,
    #[error("Customer not found")]
    CustomerNotFound,
}

/// Read access needed by the validator. Implementations usually run inside
/// the same transaction (or lock) as the subsequent insert.
#[async_trait]
pub trait OrderLookup: Send {
    async fn product(&mut self, id: i64) -> Result<Option<Product>, StoreError>;
    async fn customer(&mut self, id: i64) -> Result<Option<Customer>, StoreError>;
}

pub async fn validate_order<L>(lookup: &mut L, draft: OrderDraft) -> Result<ValidatedOrder, OrderRejection>
where
    L: OrderLookup + ?Sized,
{
    // Product first: a missing product must short-circuit before the customer lookup.
    let product = match lookup.product(draft.product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => return Err(OrderRejection::ProductNotFound),
        Err(e) => {
            warn!(error = %e, product_id = draft.product_id, "Product lookup failed");
            return Err(OrderRejection::ProductNotFound);
        }
    };

    match lookup.customer(draft.customer_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(OrderRejection::CustomerNotFound),
        Err(e) => {
            warn!(error = %e, customer_id = draft.customer_id, "Customer lookup failed");
            return Err(OrderRejection::CustomerNotFound);
        }
    }

    let total = draft.quantity as f64 * product.price;
    debug!(product_id = product.id, quantity = draft.quantity, total, "Order validated");

    Ok(ValidatedOrder {
        customer_id: draft.customer_id,
        product_id: draft.product_id,
        quantity: draft.quantity,
        total,
    })
}
