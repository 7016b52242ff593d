// src/dtos/customer.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::customer::{Customer, CustomerFields};

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
}

impl From<CustomerRequest> for CustomerFields {
    fn from(req: CustomerRequest) -> Self {
        Self { name: req.name, email: req.email }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}
