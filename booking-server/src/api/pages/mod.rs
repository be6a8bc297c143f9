//! 受保护页面
//!
//! 以下页面需要登录；未登录的浏览器由 `require_login` 重定向到登录页。
//! 其余静态文件由 fallback 直接提供。

use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

use crate::core::ServerState;

/// Pages that require a session
pub const PROTECTED_PAGES: [&str; 3] = [
    "BookATable.html",
    "CustomerDashboard.html",
    "reservation-management.html",
];

pub fn router(static_dir: &Path) -> Router<ServerState> {
    PROTECTED_PAGES
        .iter()
        .fold(Router::new(), |router, page| {
            router.route_service(&format!("/{page}"), ServeFile::new(static_dir.join(page)))
        })
}
