//! 认证中间件
//!
//! 为会话认证和角色检查提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, Method, Uri, header};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, session};
use crate::core::ServerState;
use crate::security_log;

/// Where browsers go when they need to log in
pub const LOGIN_PAGE: &str = "/login.html";

/// Validate the session token carried by a request
pub fn authenticate(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<CurrentUser, AppError> {
    let Some(token) = session::token_from_headers(headers) else {
        security_log!(WARN, "auth_missing", uri = %uri);
        return Err(AppError::unauthorized());
    };

    let claims = state.get_jwt_service().validate_token(&token).map_err(|e| {
        security_log!(WARN, "auth_failed", error = %e, uri = %uri);
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            other => AppError::invalid_token(other.to_string()),
        }
    })?;

    CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed claims: {e}")))
}

/// Whether a failed auth should answer with JSON rather than a redirect
///
/// `/api/*`, non-GET requests and clients asking for JSON get a 401 body;
/// plain page loads are sent to the login page.
fn wants_json(method: &Method, uri: &Uri, headers: &HeaderMap) -> bool {
    if uri.path().starts_with("/api/") {
        return true;
    }
    if method != Method::GET && method != Method::HEAD {
        return true;
    }
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// 认证中间件 - 要求用户登录
///
/// 从 cookie (或 `Authorization: Bearer`) 提取并验证会话令牌，
/// 成功后将 [`CurrentUser`] 注入请求扩展。
///
/// | 情况 | 响应 |
/// |------|------|
/// | API / JSON 请求未登录 | 401 JSON |
/// | 页面请求未登录 | 303 重定向到 `/login.html` |
pub async fn require_login(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    match authenticate(&state, req.headers(), req.uri()) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) if wants_json(req.method(), req.uri(), req.headers()) => err.into_response(),
        Err(_) => Redirect::to(LOGIN_PAGE).into_response(),
    }
}

/// 管理员中间件 - 要求 manager 角色
///
/// 必须放在 [`require_login`] 之后。非 manager 返回 403。
pub async fn require_manager(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;

    if !user.is_manager() {
        security_log!(
            WARN,
            "manager_required",
            user_id = %user.id,
            username = %user.username,
            uri = %req.uri()
        );
        return Err(AppError::forbidden("Forbidden: manager access required."));
    }

    Ok(next.run(req).await)
}
