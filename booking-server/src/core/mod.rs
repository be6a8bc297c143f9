//! 核心模块
//!
//! - [`Config`] - 环境变量配置 (端口、会话、管理员账号、餐桌数量、押金)
//! - [`ServerState`] - 共享状态：内存存储、会话服务、路由
//! - [`Server`] - 监听与优雅退出
//! - [`ServerError`] - 启动阶段错误

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
