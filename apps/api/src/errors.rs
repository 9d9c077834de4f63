use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::variants::errors::{ResolveError, SpecErrors};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid variant: {0}")]
    InvalidVariant(SpecErrors),

    #[error("Resolution failed: {0}")]
    Resolution(ResolveError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidSpec(errors) => AppError::InvalidVariant(errors),
            other => AppError::Resolution(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                Value::Null,
            ),
            AppError::InvalidVariant(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_VARIANT",
                errors.to_string(),
                serde_json::to_value(errors).unwrap_or_default(),
            ),
            AppError::Resolution(err) => {
                tracing::warn!("Variant resolution failed: {err}");
                let details = match err {
                    ResolveError::Override {
                        index,
                        operation,
                        path,
                        ..
                    } => json!({ "index": index, "operation": operation, "path": path }),
                    _ => Value::Null,
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "RESOLUTION_FAILED",
                    err.to_string(),
                    details,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Value::Null,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if !details.is_null() {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
