use booking_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env (可选)
    let _ = dotenv::dotenv();

    // 2. 加载配置并初始化日志
    let config = Config::from_env()?;
    setup_environment(&config)?;

    print_banner();
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        tables = config.table_count,
        "🍽️ Booking server starting..."
    );

    // 3. 初始化服务器状态 (存储种子数据、会话服务、路由)
    let state = ServerState::initialize(&config)?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
