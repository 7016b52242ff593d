// src/store/memory.rs
//! Process-local store used for `STORE_BACKEND=memory` and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::customer::{Customer, CustomerFields};
use crate::models::order::Order;
use crate::models::product::{Product, ProductFields};
use crate::services::order::{validate_order, OrderDraft, OrderLookup};
use super::{OrderError, Store, StoreError};

#[derive(Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    customers: BTreeMap<i64, Customer>,
    orders: BTreeMap<i64, Order>,
    last_product_id: i64,
    last_customer_id: i64,
    last_order_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderLookup for Tables {
    async fn product(&mut self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.products.get(&id).cloned())
    }

    async fn customer(&mut self, id: i64) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.get(&id).cloned())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.tables.lock().await.products.values().cloned().collect())
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.lock().await.products.get(&id).cloned())
    }

    async fn create_product(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.last_product_id += 1;
        let now = Utc::now();
        let product = Product {
            id: tables.last_product_id,
            name: fields.name,
            price: fields.price,
            stock: fields.stock,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.products.get_mut(&id).map(|product| {
            product.name = fields.name;
            product.price = fields.price;
            product.stock = fields.stock;
            product.updated_at = Utc::now();
            product.clone()
        }))
    }

    async fn delete_product(&self, id: i64) -> Result<u64, StoreError> {
        let removed = self.tables.lock().await.products.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.tables.lock().await.customers.values().cloned().collect())
    }

    async fn get_customer(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        Ok(self.tables.lock().await.customers.get(&id).cloned())
    }

    async fn create_customer(&self, fields: CustomerFields) -> Result<Customer, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.last_customer_id += 1;
        let now = Utc::now();
        let customer = Customer {
            id: tables.last_customer_id,
            name: fields.name,
            email: fields.email,
            created_at: now,
            updated_at: now,
        };
        tables.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, id: i64, fields: CustomerFields) -> Result<Option<Customer>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.customers.get_mut(&id).map(|customer| {
            customer.name = fields.name;
            customer.email = fields.email;
            customer.updated_at = Utc::now();
            customer.clone()
        }))
    }

    async fn delete_customer(&self, id: i64) -> Result<u64, StoreError> {
        let removed = self.tables.lock().await.customers.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.tables.lock().await.orders.get(&id).cloned())
    }

    async fn place_order(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        // Held across validation and insert so both see the same snapshot
        let mut tables = self.tables.lock().await;
        let validated = validate_order(&mut *tables, draft).await?;

        tables.last_order_id += 1;
        let now = Utc::now();
        let order = Order {
            id: tables.last_order_id,
            customer_id: validated.customer_id,
            product_id: validated.product_id,
            quantity: validated.quantity,
            total: validated.total,
            created_at: now,
            updated_at: now,
        };
        tables.orders.insert(order.id, order.clone());
        debug!(order_id = order.id, "Order stored");

        Ok(order)
    }

    async fn close(&self) {}
}
