// src/dtos/envelope.rs
use serde::Serialize;

/// Success body shared by every endpoint: `{"message": ..., "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}
