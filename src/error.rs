// src/error.rs
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use tracing::error;

use crate::store::{OrderError, StoreError};

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    PersistFailed(String),
    NotFound(String),
    ValidationError(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) | AppError::PersistFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::DatabaseError(e) => {
                error!(error = %e, "Database error");
                "Database error occurred"
            }
            AppError::PersistFailed(msg) => {
                error!(%msg, "Write had no effect");
                msg.as_str()
            }
            AppError::NotFound(msg) => msg.as_str(),
            AppError::ValidationError(msg) => msg.as_str(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::DatabaseError(e),
            StoreError::PersistFailed(msg) => AppError::PersistFailed(msg.to_string()),
        }
    }
}

// Order rejections are reported as 400, like any other bad input.
impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Rejected(reason) => AppError::validation(reason.to_string()),
            OrderError::Store(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}
