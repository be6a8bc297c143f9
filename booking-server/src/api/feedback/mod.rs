//! Feedback API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/feedback", post(handler::create))
        .route("/api/my-feedback", get(handler::mine))
}
