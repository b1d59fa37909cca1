//! CLI 模块
//!
//! ```bash
//! # 启动模拟平台并填充演示会员
//! mock-platform server --port 8090 --populate
//!
//! # 要求调用方携带凭证
//! mock-platform server --app-secret dev-secret
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
