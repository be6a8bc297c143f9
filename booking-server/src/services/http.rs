//! HTTP 服务
//!
//! 组装路由与中间件，缓存最终的 Router。网络监听和进程内 oneshot
//! 调用共用同一个 Router 实例。
//!
//! 依赖方向是单向的：HttpService -> Router -> ServerState。
//! ServerState 不持有 HttpService，否则 Arc 成环，两者都不会释放。

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Body;
use axum::{Router, middleware};
use parking_lot::RwLock;
use tower::ServiceExt;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::{require_login, require_manager};
use crate::core::{Config, ServerState};

/// Result type for oneshot calls
pub type OneshotResult = anyhow::Result<http::Response<Body>>;

/// HTTP 请求日志中间件
async fn log_request(request: http::Request<Body>, next: middleware::Next) -> http::Response<Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// Build the router with all routes and auth layers (state not yet applied)
///
/// | 分组 | 中间件 |
/// |------|--------|
/// | auth, health | 无 |
/// | booking, payments, feedback, pages | require_login |
/// | manager | require_login + require_manager |
/// | 其他路径 | 静态文件 |
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let static_dir = Path::new(&state.config.static_dir);

    let customer = Router::<ServerState>::new()
        .merge(crate::api::reservations::router())
        .merge(crate::api::payments::router())
        .merge(crate::api::feedback::router())
        .merge(crate::api::pages::router(static_dir))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    // route_layer: the last one added runs first
    let manager = crate::api::manager::router()
        .route_layer(middleware::from_fn(require_manager))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    Router::<ServerState>::new()
        .merge(crate::api::auth::router())
        .merge(crate::api::health::router())
        .merge(customer)
        .merge(manager)
        .fallback_service(ServeDir::new(static_dir))
}

#[derive(Clone, Debug)]
pub struct HttpService {
    config: Config,
    router: Arc<RwLock<Option<Router>>>,
}

impl HttpService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            router: Arc::new(RwLock::new(None)),
        }
    }

    /// Build and cache the router for the given state
    ///
    /// Must be called once the state is fully constructed.
    pub fn initialize(&self, state: ServerState) {
        let app = build_app(&state)
            .with_state(state)
            .layer(ConcurrencyLimitLayer::new(self.config.max_connections))
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(TraceLayer::new_for_http())
            // 请求日志 - 最外层
            .layer(middleware::from_fn(log_request));

        *self.router.write() = Some(app);
    }

    pub fn router(&self) -> Option<Router> {
        self.router.read().clone()
    }

    /// Dispatch a request straight into the router, no socket involved
    pub async fn oneshot(&self, request: http::Request<Body>) -> OneshotResult {
        let router = self.router().context("HttpService not initialized")?;
        let response = router.oneshot(request).await?;
        Ok(response)
    }

    /// Bind `HTTP_PORT` and serve until `shutdown_signal` resolves
    pub async fn start_server<F>(&self, shutdown_signal: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router().context("HttpService not initialized with router")?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("🚀 Starting HTTP server on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .context("Server error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ServerState {
        let config = Config::with_overrides(0, "./public").unwrap();
        ServerState::initialize(&config).unwrap()
    }

    #[test]
    fn dropping_the_service_releases_the_state() {
        let state = state();
        let jwt = Arc::downgrade(&state.jwt_service);

        let http = state.http_service();
        drop(state);
        assert!(http.router().is_some());
        assert!(jwt.upgrade().is_some());

        drop(http);
        assert!(jwt.upgrade().is_none());
    }

    #[tokio::test]
    async fn uninitialized_service_refuses_requests() {
        let http = HttpService::new(Config::with_overrides(0, "./public").unwrap());
        let request = http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        assert!(http.oneshot(request).await.is_err());
    }
}
