use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::{DbService, MemoryDb};
use crate::services::HttpService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | MemoryDb | 内存存储 |
/// | jwt_service | Arc<JwtService> | 会话令牌服务 |
///
/// Router 持有 state 的克隆，所以 state 不能反过来持有 Router
/// (见 [`ServerState::http_service`])。
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: MemoryDb,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: MemoryDb, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 内存存储 (餐桌与管理员账号)
    /// 2. 会话令牌服务
    pub fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::initialize(&config.seed_config())
            .map_err(|e| ServerError::Init(e.to_string()))?;
        let jwt_service = JwtService::with_config(config.jwt.clone())
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let state = Self::new(config.clone(), db, Arc::new(jwt_service));
        crate::api::health::mark_started();

        Ok(state)
    }

    /// HTTP 服务，路由已绑定本 state
    ///
    /// The service owns the router and the router owns a state clone;
    /// dropping the service releases both.
    pub fn http_service(&self) -> HttpService {
        let http = HttpService::new(self.config.clone());
        http.initialize(self.clone());
        http
    }

    pub fn get_db(&self) -> MemoryDb {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
