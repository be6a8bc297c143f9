//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、登出、会话查询
//! - [`reservations`] - 顾客预订
//! - [`payments`] - 押金支付
//! - [`feedback`] - 顾客评价
//! - [`manager`] - 经理后台
//! - [`pages`] - 需要登录的静态页面

pub mod convert;
pub mod extract;

pub mod auth;
pub mod health;
pub mod pages;

// Customer API
pub mod feedback;
pub mod payments;
pub mod reservations;

// Manager API
pub mod manager;

// Re-export common types for handlers
pub use crate::utils::AppResult;
