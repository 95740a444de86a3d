use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::subscription::errors::SubscriptionError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Body parsing error: {0}")]
    BodyParsingError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Map a domain error into a boundary error.
    ///
    /// Distinguished domain outcomes keep their message. Anything else is
    /// logged in full and answered with `summary` only.
    pub fn from_domain(err: anyhow::Error, summary: &str) -> Self {
        if let Some(domain) = err.downcast_ref::<SubscriptionError>() {
            return match domain {
                SubscriptionError::NotFound(_) => AppError::NotFound(domain.to_string()),
                SubscriptionError::InvalidInput(msg) => AppError::ValidationError(msg.clone()),
            };
        }

        if let Some(errors) = err.downcast_ref::<ValidationErrors>() {
            return AppError::ValidationError(errors.to_string());
        }

        error!(error = ?err, "{summary}");

        if err.downcast_ref::<sqlx::Error>().is_some() {
            AppError::DatabaseError(summary.to_string())
        } else {
            AppError::InternalServerError(summary.to_string())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BodyParsingError(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
