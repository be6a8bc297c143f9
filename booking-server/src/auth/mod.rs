//! 认证授权模块
//!
//! - [`JwtService`] - 会话令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_login`] - 登录检查中间件
//! - [`require_manager`] - manager 角色检查中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{LOGIN_PAGE, authenticate, require_login, require_manager};
pub use session::{SESSION_COOKIE, clear_session_cookie, session_cookie};
