//! 命令执行器

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::generators::DataGenerator;
use crate::services::{PlatformState, router};

/// 命令执行器
#[derive(Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// 执行 server 命令
    pub async fn run_server(
        &self,
        port: u16,
        populate: bool,
        member_count: usize,
        app_secret: Option<String>,
    ) -> Result<()> {
        info!(port, populate, member_count, "启动模拟平台");

        let mut state = PlatformState::new();
        if let Some(secret) = app_secret {
            state = state.with_app_secret(secret);
            info!("已启用凭证校验");
        }

        if populate {
            DataGenerator::new(member_count).populate(&state);
        }

        let app = router(Arc::new(state));

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

        info!("模拟平台已启动: http://{}", addr);
        info!("  GET  /health");
        info!("  GET  /members/v1/members/{{member_id}}/memberships");
        info!("  GET  /ecom/v1/members/{{member_id}}/orders?paymentStatus=PAID");
        info!("  POST 同路径写入测试数据");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("模拟平台已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到 Ctrl+C，停止服务");
    }
}
