use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid amount {0} (must be positive)")]
    InvalidAmount(Decimal),

    #[error("Balance overflow")]
    Overflow,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
