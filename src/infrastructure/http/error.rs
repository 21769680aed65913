//! HTTP Error Handling
//!
//! OpenAI 风格错误体：`{"error": {"message", "type", "code"}}`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 错误类型定义
pub mod error_type {
    pub const INVALID_REQUEST: &str = "invalid_request_error";
    pub const SERVER_ERROR: &str = "server_error";
}

/// 错误详情
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: Option<&'static str>,
}

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

impl ErrorResponse {
    pub fn new(kind: &'static str, code: Option<&'static str>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                kind,
                code,
            },
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 400，附带可选的机器可读错误码
    BadRequest {
        message: String,
        code: Option<&'static str>,
    },
    /// 413
    PayloadTooLarge(String),
    /// 422
    Unprocessable(String),
    /// 500
    Internal(String),
    /// 503
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response = match self {
            ApiError::BadRequest { message, code } => {
                tracing::warn!(status = status.as_u16(), error = %message, "Bad request");
                ErrorResponse::new(error_type::INVALID_REQUEST, code, message)
            }
            ApiError::PayloadTooLarge(message) => {
                tracing::warn!(status = status.as_u16(), error = %message, "Request body too large");
                ErrorResponse::new(error_type::INVALID_REQUEST, None, message)
            }
            ApiError::Unprocessable(message) => {
                tracing::warn!(status = status.as_u16(), error = %message, "Unprocessable request");
                ErrorResponse::new(error_type::INVALID_REQUEST, None, message)
            }
            ApiError::Internal(message) => {
                tracing::error!(status = status.as_u16(), error = %message, "Internal server error");
                ErrorResponse::new(error_type::SERVER_ERROR, None, message)
            }
            ApiError::ServiceUnavailable(message) => {
                tracing::error!(status = status.as_u16(), error = %message, "Service unavailable");
                ErrorResponse::new(error_type::SERVER_ERROR, Some("engine_unavailable"), message)
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::Unprocessable(msg),
            ApplicationError::BadRequest(msg) => ApiError::bad_request(msg),
            ApplicationError::UnknownVoice { .. } => ApiError::BadRequest {
                message: e.to_string(),
                code: Some("voice_not_found"),
            },
            ApplicationError::ExternalServiceError(_) => ApiError::ServiceUnavailable(e.to_string()),
            ApplicationError::ExportError(_) | ApplicationError::InternalError(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge(rejection.body_text());
        }
        ApiError::bad_request(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}
