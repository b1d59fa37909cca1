//! HTTP 请求处理器模块
//!
//! 插件协议处理器、健康检查与兜底路由

pub mod fallback;
pub mod health;
pub mod payload;
pub mod plugin;
pub mod triggers;

pub use payload::PluginPayload;
