pub mod customer;
pub mod order;
pub mod product;

use crate::error::AppError;

/// Path ids arrive as raw strings so a malformed id gets a JSON 400 body.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::validation(format!("Invalid {entity} ID")))
}
