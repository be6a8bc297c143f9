//! Manager API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/manager/customers | GET | 顾客列表 |
//! | /api/manager/customers/{id} | DELETE | 删除顾客 (级联) |
//! | /api/manager/customers/{id}/reservations | GET | 顾客预订 |
//! | /api/manager/customers/{id}/feedback | GET | 顾客评价 |
//! | /api/manager/update-reservation | POST | 修改任意预订 |
//! | /api/manager/reservations | GET | 所有预订 |
//! | /api/manager/tables | GET | 餐桌列表 |
//! | /api/manager/tables/{id} | PUT | 修改餐桌 |
//!
//! 需要经理角色，由上层 `require_manager` 检查。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/manager", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/customers", get(handler::list_customers))
        .route("/customers/{id}", delete(handler::delete_customer))
        .route(
            "/customers/{id}/reservations",
            get(handler::customer_reservations),
        )
        .route("/customers/{id}/feedback", get(handler::customer_feedback))
        .route("/update-reservation", post(handler::update_reservation))
        .route("/reservations", get(handler::list_reservations))
        .route("/tables", get(handler::list_tables))
        .route("/tables/{id}", put(handler::update_table))
}
