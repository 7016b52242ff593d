// src/store/mod.rs
//! Data store collaborator used by every handler.
//!
//! Handlers only ever see `Arc<dyn Store>`; the process entry point picks the
//! backend, owns its lifecycle and closes it on shutdown.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::customer::{Customer, CustomerFields};
use crate::models::order::Order;
use crate::models::product::{Product, ProductFields};
use crate::services::order::{OrderDraft, OrderRejection};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A write completed without producing a row.
    #[error("{0}")]
    PersistFailed(&'static str),
}

/// Outcome of `Store::place_order` when no order was written.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Rejected(#[from] OrderRejection),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Store(StoreError::Database(err))
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;
    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError>;
    async fn create_product(&self, fields: ProductFields) -> Result<Product, StoreError>;
    /// Overwrites every field; `None` when no product has this id.
    async fn update_product(&self, id: i64, fields: ProductFields) -> Result<Option<Product>, StoreError>;
    /// Returns the number of deleted rows. Missing ids delete nothing.
    async fn delete_product(&self, id: i64) -> Result<u64, StoreError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;
    async fn get_customer(&self, id: i64) -> Result<Option<Customer>, StoreError>;
    async fn create_customer(&self, fields: CustomerFields) -> Result<Customer, StoreError>;
    async fn update_customer(&self, id: i64, fields: CustomerFields) -> Result<Option<Customer>, StoreError>;
    async fn delete_customer(&self, id: i64) -> Result<u64, StoreError>;

    async fn get_order(&self, id: i64) -> Result<Option<Order>, StoreError>;
    /// Validates the draft and persists it as one atomic unit.
    async fn place_order(&self, draft: OrderDraft) -> Result<Order, OrderError>;

    async fn close(&self);
}
