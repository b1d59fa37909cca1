//! CLI 命令定义

use clap::{Parser, Subcommand};

/// 模拟平台命令行工具
#[derive(Parser, Debug)]
#[command(name = "mock-platform")]
#[command(version, about = "折扣触发器联调用的模拟平台")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动模拟平台 HTTP 服务
    Server {
        /// 服务端口
        #[arg(short, long, default_value = "8090")]
        port: u16,

        /// 是否预填充演示数据
        #[arg(long)]
        populate: bool,

        /// 预填充的随机会员数量
        #[arg(long, default_value = "0")]
        member_count: usize,

        /// 要求请求头 authorization 等于该值
        #[arg(long)]
        app_secret: Option<String>,
    },
}
