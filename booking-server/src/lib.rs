//! Booking Server - 餐厅订座系统
//!
//! # 架构概述
//!
//! - **存储** (`db`): 进程内存储，单把互斥锁保证分桌原子性
//! - **认证** (`auth`): JWT 会话 Cookie + Argon2 密码哈希
//! - **HTTP API** (`api`): 预订、支付、评价、经理后台
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT、会话 Cookie、登录中间件
//! ├── services/      # HTTP 服务 (路由缓存、oneshot)
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验、时间
//! └── db/            # 内存存储、分桌、仓储
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 初始化日志 (控制台；配置 LOG_DIR 时同时写入滚动文件)
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    match config.log_dir.as_deref() {
        Some(dir) => init_logger_with_file(&config.log_level, config.log_json, Some(dir)),
        None => init_logger(&config.log_level, config.log_json),
    }
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}
