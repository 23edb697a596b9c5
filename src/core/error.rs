//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SKU already exists: {0}")]
    DuplicateSku(String),
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
    #[error("存储锁已损坏: {0}")]
    LockPoisoned(&'static str),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl CoreError {
    pub fn product_not_found() -> Self {
        CoreError::NotFound("Product not found".to_string())
    }

    /// 记录内部错误原因，对外只返回固定文案
    pub fn internal(message: &str, cause: impl std::fmt::Display) -> Self {
        error!("{}: {}", message, cause);
        CoreError::InternalServerError(message.to_string())
    }

    /// 把存储层错误映射为 HTTP 错误，`fallback` 为 500 时的固定文案
    pub fn from_store(err: StoreError, fallback: &str) -> Self {
        match err {
            StoreError::DuplicateSku(_) | StoreError::DuplicateUsername(_) => {
                CoreError::Conflict(err.to_string())
            }
            StoreError::LockPoisoned(_) => CoreError::internal(fallback, err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, user_message) = match self {
            CoreError::BadRequest(msg) => ("BAD_REQUEST", msg),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg),
            CoreError::Conflict(msg) => ("CONFLICT", msg),
            CoreError::InternalServerError(msg) => ("INTERNAL_SERVER_ERROR", msg),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        messages.sort();
        messages.dedup();

        if messages.is_empty() {
            CoreError::BadRequest("Validation error".to_string())
        } else {
            CoreError::BadRequest(messages.join("; "))
        }
    }
}
