//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use sea_orm::SqlErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Order parameter outside the supported set
    #[error("Orden no válido '{0}': use asc, desc, age-asc o age-des")]
    InvalidOrderKey(String),
    /// A stored birthdate that is not a `YYYY-MM-DD` calendar date
    #[error("Fecha de nacimiento no válida: '{0}'")]
    InvalidDateFormat(String),
    /// Create payload that is neither an object nor an array
    #[error("Formato no soportado")]
    UnsupportedPayloadShape,
    /// Validation error with message
    #[error("Validation error: {0}")]
    Validation(String),
    /// Unique constraint violation (duplicate e-mail)
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
            _ => DomainError::Database(e.to_string()),
        }
    }
}
