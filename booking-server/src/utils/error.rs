//! 统一错误处理
//!
//! 提供应用级错误类型：
//! - [`AppError`] - 应用错误枚举，直接实现 `IntoResponse`
//!
//! # 错误码规范
//!
//! | 错误码 | HTTP | 说明 |
//! |--------|------|------|
//! | E0002 | 400 | 验证失败 |
//! | E0003 | 404 | 资源不存在 |
//! | E0004 | 409 | 资源冲突 |
//! | E2001 | 403 | 无权限 |
//! | E3001 | 401 | 未登录 |
//! | E3002 | 401 | 无效令牌 |
//! | E3003 | 401 | 令牌过期 |
//! | E3004 | 401 | 账号或密码错误 |
//! | E9001 | 500 | 内部错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! Err(AppError::not_found("Customer not found."))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ApiResponse;
use tracing::error;

use crate::db::repository::RepoError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Not authenticated. Please log in.")]
    /// 未登录 (401)
    Unauthorized,

    #[error("Session expired. Please log in again.")]
    /// 会话过期 (401)
    TokenExpired,

    #[error("Invalid session: {0}")]
    /// 无效令牌 (401)
    InvalidToken(String),

    #[error("Login failed: Invalid email or password.")]
    /// 账号或密码错误 (401)
    InvalidCredentials,

    // ========== 权限错误 (403) ==========
    #[error("{0}")]
    /// 无权限 (403)
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("{0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("{0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("{0}")]
    /// 验证失败 (400)
    Validation(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized
            | AppError::TokenExpired
            | AppError::InvalidToken(_)
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "E3001",
            AppError::InvalidToken(_) => "E3002",
            AppError::TokenExpired => "E3003",
            AppError::InvalidCredentials => "E3004",
            AppError::Forbidden(_) => "E2001",
            AppError::NotFound(_) => "E0003",
            AppError::Conflict(_) => "E0004",
            AppError::Validation(_) => "E0002",
            AppError::Internal(_) => "E9001",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
            // 令牌细节只记日志，不回传客户端
            AppError::InvalidToken(_) => "Invalid session. Please log in again.".to_string(),
            other => other.to_string(),
        };

        let body = Json(ApiResponse::<()>::error(self.code(), message));
        (self.status(), body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Allocation(e) => AppError::Validation(e.to_string()),
            RepoError::Forbidden(msg) => AppError::Forbidden(msg),
            RepoError::Credential(msg) => AppError::Internal(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    /// Unified message for unknown email and wrong password alike
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
