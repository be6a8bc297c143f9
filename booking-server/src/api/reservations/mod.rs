//! Reservation API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /book-reservation | POST | 预订 |
//! | /api/my-reservations | GET | 我的预订 |
//! | /api/update-reservation | POST | 修改预订 |
//! | /api/cancel-reservation/{id} | POST | 取消预订 |
//!
//! 登录检查由上层 `require_login` 负责。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/book-reservation", post(handler::book))
        .route("/api/my-reservations", get(handler::my_reservations))
        .route("/api/update-reservation", post(handler::update))
        .route("/api/cancel-reservation/{id}", post(handler::cancel))
}
