// src/store/postgres.rs
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

use crate::models::customer::{Customer, CustomerFields};
use crate::models::order::Order;
use crate::models::product::{Product, ProductFields};
use crate::services::order::{validate_order, OrderDraft, OrderLookup};
use super::{OrderError, Store, StoreError};

const PRODUCT_COLUMNS: &str =
    "id, name, price, stock, created_at, updated_at";
const CUSTOMER_COLUMNS: &str = "id, name, email, created_at, updated_at";
const ORDER_COLUMNS: &str =
    "id, customer_id, product_id, quantity, total, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lookups performed on the connection of an open order transaction.
/// Rows are locked `FOR SHARE` so they cannot be deleted before commit.
struct TxLookup<'c> {
    conn: &'c mut PgConnection,
}

#[async_trait]
impl<'c> OrderLookup for TxLookup<'c> {
    async fn product(&mut self, id: i64) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR SHARE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(product)
    }

    async fn customer(&mut self, id: i64) -> Result<Option<Customer>, StoreError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1 FOR SHARE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(customer)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn create_product(&self, fields: ProductFields) -> Result<Product, StoreError> {
        sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, price, stock, created_at, updated_at)
             VALUES ($1, $2, $3, NOW(), NOW())
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(fields.price)
        .bind(fields.stock)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::PersistFailed("Failed to create product"))
    }

    async fn update_product(&self, id: i64, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = $1, price = $2, stock = $3, updated_at = NOW()
             WHERE id = $4
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(fields.price)
        .bind(fields.stock)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    async fn get_customer(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn create_customer(&self, fields: CustomerFields) -> Result<Customer, StoreError> {
        sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO customers (name, email, created_at, updated_at)
             VALUES ($1, $2, NOW(), NOW())
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(&fields.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::PersistFailed("Failed to create customer"))
    }

    async fn update_customer(&self, id: i64, fields: CustomerFields) -> Result<Option<Customer>, StoreError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "UPDATE customers SET name = $1, email = $2, updated_at = NOW()
             WHERE id = $3
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn delete_customer(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    async fn place_order(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        // Start transaction; dropping it without commit rolls back
        let mut tx = self.pool.begin().await?;

        let validated = validate_order(&mut TxLookup { conn: &mut *tx }, draft).await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (customer_id, product_id, quantity, total, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NOW(), NOW())
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(validated.customer_id)
        .bind(validated.product_id)
        .bind(validated.quantity)
        .bind(validated.total)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::PersistFailed("Failed to create order"))?;

        tx.commit().await?;
        debug!(order_id = order.id, "Order committed");

        Ok(order)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
