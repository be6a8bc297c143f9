//! Authentication Handlers
//!
//! Signup, login, logout and the session check

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use shared::client::{LoginRequest, LogoutResponse, MessageResponse, SessionInfo, SignupRequest};
use shared::models::Role;

use crate::api::extract::AppJson;
use crate::auth::{CurrentUser, LOGIN_PAGE, clear_session_cookie, session_cookie};
use crate::core::ServerState;
use crate::db::models::CustomerCreate;
use crate::db::repository::{CustomerRepository, ManagerRepository};
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, is_plausible_email,
    non_blank, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const SIGNUP_INVALID: &str = "Registration failed: Missing data or passwords do not match.";

/// Phone shown for customers who did not give one
const NO_PHONE: &str = "N/A";

/// POST /signup - 注册顾客账号
pub async fn signup(
    State(state): State<ServerState>,
    payload: Result<AppJson<SignupRequest>, AppError>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let AppJson(req) = payload.map_err(|_| AppError::validation(SIGNUP_INVALID))?;
    let (Some(email), Some(username), Some(password), Some(confirm)) = (
        non_blank(&req.email),
        non_blank(&req.username),
        req.password.as_deref().filter(|p| !p.is_empty()),
        req.confirm_password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation(SIGNUP_INVALID));
    };
    if password != confirm {
        return Err(AppError::validation(SIGNUP_INVALID));
    }

    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(username, "username", MAX_NAME_LEN)?;
    validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
    if !is_plausible_email(email) {
        return Err(AppError::validation("Registration failed: Invalid email address."));
    }
    let phone = match non_blank(&req.phone) {
        Some(p) => {
            validate_required_text(p, "phone", MAX_SHORT_TEXT_LEN)?;
            p.to_string()
        }
        None => NO_PHONE.to_string(),
    };

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.create(CustomerCreate {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: Some(phone),
    })?;

    tracing::info!(customer_id = %customer.id, "Customer signed up");
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Signup successful"))))
}

/// POST /login - 登录
///
/// 先查顾客再查管理员。成功时写入会话 cookie，响应体为对应仪表盘路径 (纯文本)。
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Response> {
    let (Some(email), Some(password)) = (
        non_blank(&req.email),
        req.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation("Login failed: Missing email or password."));
    };

    let db = state.get_db();
    let account = if let Some(c) = CustomerRepository::new(db.clone()).find_by_email(email) {
        let ok = c
            .verify_password(password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
        ok.then(|| (c.id.to_string(), c.username, Role::Customer))
    } else if let Some(m) = ManagerRepository::new(db).find_by_email(email) {
        let ok = m
            .verify_password(password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
        ok.then(|| (m.id.to_string(), m.name, Role::Manager))
    } else {
        None
    };

    // 未知邮箱与错误密码使用同一错误信息
    let Some((user_id, username, role)) = account else {
        security_log!(WARN, "login_failed", email = %email);
        return Err(AppError::invalid_credentials());
    };

    let jwt = state.get_jwt_service();
    let token = jwt
        .generate_token(&user_id, &username, role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
    let cookie = session_cookie(&token, jwt.max_age_seconds(), state.config.is_production())
        .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))?;

    tracing::info!(user_id = %user_id, role = %role, "User logged in");
    Ok(([(header::SET_COOKIE, cookie)], role.dashboard_path()).into_response())
}

/// POST /api/logout - 登出 (JSON)
pub async fn logout(user: Option<CurrentUser>) -> impl IntoResponse {
    if let Some(user) = user {
        tracing::info!(user_id = %user.id, "User logged out");
    }
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(LogoutResponse { ok: true }),
    )
}

/// GET /logout - 登出并跳转登录页
pub async fn logout_page(user: Option<CurrentUser>) -> impl IntoResponse {
    if let Some(user) = user {
        tracing::info!(user_id = %user.id, "User logged out");
    }
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to(LOGIN_PAGE),
    )
}

/// GET /api/session - 会话探测，从不失败
pub async fn session(user: Option<CurrentUser>) -> Json<SessionInfo> {
    Json(match user {
        Some(u) => SessionInfo {
            is_logged_in: true,
            role: Some(u.role),
            username: Some(u.username),
            user_id: Some(u.id),
        },
        None => SessionInfo::anonymous(),
    })
}
