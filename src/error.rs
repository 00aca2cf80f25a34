use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid cast hash: {0}")]
    InvalidCastHash(String),

    #[error("Cast not found: {0}")]
    CastNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream auth error: {0}")]
    UpstreamAuthError(String),

    #[error("Upstream request failed (HTTP {status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg,
                )
            }
            AppError::InvalidCastHash(msg) => {
                log::warn!("Invalid cast hash: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "INVALID_CAST_HASH",
                    msg,
                )
            }
            AppError::CastNotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "CAST_NOT_FOUND",
                msg,
            ),
            AppError::NotFound(msg) => (actix_web::http::StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::UpstreamAuthError(msg) => {
                log::error!("Upstream auth error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "UPSTREAM_AUTH_ERROR",
                    msg,
                )
            }
            AppError::UpstreamError { status, message } => {
                log::error!("Upstream request failed: HTTP {status}: {message}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    &format!("HTTP {status}: {message}"),
                )
            }
            AppError::ReqwestError(err) => {
                log::error!("Upstream network error: {err}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    &format!("Upstream request failed: {err}"),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    &"Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
