use rust_decimal::Decimal;
use shared::models::MINIMUM_DEPOSIT;

use crate::auth::jwt::{JwtConfig, MIN_SECRET_LEN, generate_printable_secret};
use crate::core::{Result, ServerError};
use crate::db::SeedConfig;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STATIC_DIR | ./public | 静态页面目录 |
/// | SESSION_SECRET | 开发环境随机生成 | 会话签名密钥 (≥32 字符，生产环境必填) |
/// | SESSION_TTL_MINUTES | 60 | 会话有效期 |
/// | MANAGER_NAME | Boss (Wo)Man | 管理员名称 |
/// | MANAGER_EMAIL | Manager@Eden.org | 管理员邮箱 |
/// | MANAGER_PASSWORD | 12345678 | 管理员密码 |
/// | TABLE_COUNT | 20 | 初始餐桌数量 |
/// | MIN_DEPOSIT | 500.00 | 最低押金 |
/// | MAX_CONNECTIONS | 1000 | 最大并发请求数 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志输出 |
/// | LOG_DIR | (无) | 日志文件目录，未设置时只输出到控制台 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 STATIC_DIR=/srv/eden cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub static_dir: String,
    /// 会话令牌配置
    pub jwt: JwtConfig,

    // === 初始数据 ===
    pub table_count: u64,
    pub manager_name: String,
    pub manager_email: String,
    pub manager_password: String,

    /// 确认预订所需的最低押金
    pub min_deposit: Decimal,
    pub max_connections: usize,

    // === 日志 ===
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

/// 加载会话密钥
///
/// 开发构建未设置时生成临时密钥 (重启后所有会话失效)，发布构建必须设置。
fn load_session_secret() -> Result<String> {
    match std::env::var("SESSION_SECRET") {
        Ok(secret) if secret.len() >= MIN_SECRET_LEN => Ok(secret),
        Ok(_) => Err(ServerError::Config(format!(
            "SESSION_SECRET must be at least {MIN_SECRET_LEN} characters long"
        ))),
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("SESSION_SECRET not set, generating a temporary key for development");
                generate_printable_secret().map_err(|e| ServerError::Config(e.to_string()))
            }
            #[cfg(not(debug_assertions))]
            {
                Err(ServerError::Config(
                    "SESSION_SECRET environment variable must be set in release builds".to_string(),
                ))
            }
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值；只有会话密钥可能导致失败。
    pub fn from_env() -> Result<Self> {
        let jwt = JwtConfig::new(load_session_secret()?, env_or("SESSION_TTL_MINUTES", 60));

        Ok(Self {
            http_port: env_or("HTTP_PORT", 3000),
            environment: env_string("ENVIRONMENT", "development"),
            static_dir: env_string("STATIC_DIR", "./public"),
            jwt,
            table_count: env_or("TABLE_COUNT", 20),
            manager_name: env_string("MANAGER_NAME", "Boss (Wo)Man"),
            manager_email: env_string("MANAGER_EMAIL", "Manager@Eden.org"),
            manager_password: env_string("MANAGER_PASSWORD", "12345678"),
            min_deposit: env_or("MIN_DEPOSIT", MINIMUM_DEPOSIT),
            max_connections: env_or("MAX_CONNECTIONS", 1000),
            log_level: env_string("LOG_LEVEL", "info"),
            log_json: env_or("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        })
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, static_dir: impl Into<String>) -> Result<Self> {
        let mut config = Self::from_env()?;
        config.http_port = http_port;
        config.static_dir = static_dir.into();
        Ok(config)
    }

    /// 启动时写入存储的初始数据
    pub fn seed_config(&self) -> SeedConfig {
        SeedConfig {
            table_count: self.table_count,
            manager_name: self.manager_name.clone(),
            manager_email: self.manager_email.clone(),
            manager_password: self.manager_password.clone(),
        }
    }

    /// 是否生产环境 (会话 cookie 带 Secure)
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
