use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::DomainError;

/// HTTP view of a [`DomainError`]: a status code and a plain-text body
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::InvalidOrderKey(_)
            | DomainError::InvalidDateFormat(_)
            | DomainError::UnsupportedPayloadShape
            | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0 {
            DomainError::NotFound => status.into_response(),
            DomainError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (status, self.0.to_string()).into_response()
            }
            e => {
                tracing::warn!(status = status.as_u16(), "Request rejected: {}", e);
                (status, e.to_string()).into_response()
            }
        }
    }
}
