use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::creative::composer::MissingParameterError;
use crate::llm_client::image::ImageError;
use crate::llm_client::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only whole-request failures live here; field-level parse problems never
/// become errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] MissingParameterError),

    #[error("Model error: {0}")]
    Gateway(#[from] GatewayError),

    /// Multipart failure carrying the status axum assigned (400, 413, ...).
    #[error("Upload error ({status}): {message}")]
    Upload { status: StatusCode, message: String },
}

impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Upload {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upload { status, message } => {
                let code = if *status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "VALIDATION_ERROR"
                };
                (*status, code, format!("Malformed upload: {message}"))
            }
            AppError::Prompt(e) => {
                tracing::error!("Prompt composition failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROMPT_ERROR",
                    "The request could not be prepared for the model".to_string(),
                )
            }
            AppError::Gateway(e) => {
                tracing::error!("Model gateway error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_ERROR",
                    "Genie could not get a response from the model service".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
