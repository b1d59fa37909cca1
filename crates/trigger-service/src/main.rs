//! 自定义折扣触发器服务
//!
//! 宿主平台通过服务插件协议调用本服务，列出触发器并查询当前有效的触发器。

use std::sync::Arc;

use discount_shared::{config::AppConfig, observability};
use discount_triggers::{AppState, platform::HttpLookupProvider, routes};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "discount-triggers";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/*.toml + DISCOUNT_ 环境变量 + PORT
    let config = AppConfig::load(SERVICE_NAME)?;

    let obs_config = config
        .observability
        .clone()
        .with_service_name(&config.service_name);
    let _guard = observability::init(&obs_config).await?;

    info!(
        environment = %config.environment,
        mode = ?config.eligibility.mode,
        "Starting {} on {}",
        config.service_name,
        config.server_addr()
    );

    if config.platform.app_secret.is_empty() {
        warn!("platform.app_secret 未配置，平台查询可能被拒绝");
    }

    let lookups = Arc::new(HttpLookupProvider::new(&config.platform)?);
    info!(base_url = %config.platform.base_url, "平台查询客户端初始化完成");

    let state = AppState::from_config(&config, lookups)?;

    if config.server.cors_origins.trim() == "*" && config.is_production() {
        warn!("server.cors_origins=\"*\" 在生产环境中不安全，请设置为具体域名");
    }
    let cors = routes::cors_layer(&config.server.cors_origins);

    let app = routes::app(state, cors);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 收到 SIGTERM 或 Ctrl+C 时停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
