//! JSON 请求体提取器
//!
//! 与 `axum::Json` 相同，但请求体无法解析时返回 400 + `{"code","message"}`，
//! 而不是 axum 默认的纯文本 4xx。

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::utils::AppError;

/// Message for a body that is not the expected JSON shape
pub const INVALID_BODY: &str = "Invalid request body.";

/// JSON body whose rejection is an [`AppError::Validation`]
///
/// Handlers with their own wording take `Result<AppJson<T>, AppError>` and
/// replace the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    reason = %rejection.body_text(),
                    "Rejected request body"
                );
                Err(AppError::validation(INVALID_BODY))
            }
        }
    }
}
