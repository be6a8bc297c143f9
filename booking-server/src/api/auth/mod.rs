//! Authentication Routes
//!
//! All public: these routes create, check or drop the session.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/logout", get(handler::logout_page))
        .route("/api/logout", post(handler::logout))
        .route("/api/session", get(handler::session))
}
