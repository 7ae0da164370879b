//! Foodshare - 食物捐赠后端

use std::sync::Arc;

use foodshare::config::{load_config, print_config};
use foodshare::infrastructure::adapters::{JwtSessionCodec, JwtSessionCodecConfig};
use foodshare::infrastructure::http::{AppState, HttpServer, ServerConfig, SessionCookie};
use foodshare::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteFoodRepository,
    SqliteFoodRequestRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},foodshare={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Foodshare - 食物捐赠后端");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库，失败不重试
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to connect to database");
        e
    })?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let food_repo = Arc::new(SqliteFoodRepository::new(pool.clone()));
    let request_repo = Arc::new(SqliteFoodRequestRepository::new(pool.clone()));

    // 会话令牌与 cookie 策略
    let session_tokens = Arc::new(JwtSessionCodec::new(&JwtSessionCodecConfig {
        secret: config.auth.token_secret.clone(),
        ttl_days: config.auth.token_ttl_days,
    }));
    let session_cookie =
        SessionCookie::new(&config.auth.cookie_name, config.server.environment);

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(
        &config.server.host,
        config.server.port,
        config.cors.allowed_origins.clone(),
    );
    let state = AppState::new(
        food_repo,
        request_repo,
        session_tokens,
        session_cookie,
        config.auth.protect_writes,
    );

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
