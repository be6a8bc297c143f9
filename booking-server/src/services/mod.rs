//! 服务层
//!
//! - [`HttpService`] - HTTP 服务器与路由缓存

pub mod http;

pub use http::{HttpService, OneshotResult, build_app};
