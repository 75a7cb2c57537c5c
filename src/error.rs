use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Domain error taxonomy. Rate-limit rejections are data (`BudgetDecision`),
/// not errors; `RateLimited` exists only so handlers can render a 429.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Collision(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("ai provider error: {0}")]
    Ai(String),
    #[error("rate limit exceeded")]
    RateLimited {
        remaining: f64,
        retry_after_seconds: i64,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Configuration(m) | AppError::Validation(m) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": m }))).into_response()
            }
            AppError::NotFound(m) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": m }))).into_response()
            }
            AppError::Collision(m) => {
                (StatusCode::CONFLICT, Json(json!({ "detail": m }))).into_response()
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "internal server error" })),
                )
                    .into_response()
            }
            AppError::Ai(m) => {
                tracing::error!(error = %m, "ai provider error");
                (StatusCode::BAD_GATEWAY, Json(json!({ "detail": m }))).into_response()
            }
            AppError::RateLimited {
                remaining,
                retry_after_seconds,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "detail": {
                        "reason": "Rate limit exceeded",
                        "retry_after_seconds": retry_after_seconds,
                        "budget_remaining": remaining,
                    }
                })),
            )
                .into_response(),
        }
    }
}
