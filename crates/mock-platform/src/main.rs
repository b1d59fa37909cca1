//! 模拟平台命令行入口

use clap::Parser;
use mock_platform::cli::{Cli, CommandRunner, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 优先使用 RUST_LOG，否则使用命令行指定的级别
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let runner = CommandRunner::new();

    match cli.command {
        Commands::Server {
            port,
            populate,
            member_count,
            app_secret,
        } => {
            runner
                .run_server(port, populate, member_count, app_secret)
                .await?;
        }
    }

    Ok(())
}
