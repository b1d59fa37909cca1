//! 自定义折扣触发器服务
//!
//! 实现电商平台 "custom discount trigger" 服务插件协议：平台列出候选触发器，
//! 本服务返回其中当前对调用者有效的触发器。
//!
//! ## 模块结构
//!
//! - `catalog`: 静态触发器目录
//! - `eligibility`: 资格评估器、规则注册表与内置规则
//! - `platform`: 宿主平台会员 / 订单查询接口及 HTTP 实现
//! - `context`: 单次请求上下文
//! - `envelope`: webhook 令牌解码
//! - `dto`: 请求和响应的数据传输对象
//! - `handlers` / `routes` / `state`: HTTP 接入层
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 外部调用：reqwest
//! - 令牌：jsonwebtoken
//! - 序列化：serde (camelCase)

pub mod catalog;
pub mod context;
pub mod dto;
pub mod eligibility;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod platform;
pub mod routes;
pub mod state;

pub use catalog::{TRIGGER_CATALOG, TriggerCatalog, TriggerDefinition};
pub use context::RequestContext;
pub use eligibility::{
    Clock, EligibilityEvaluator, EligibilityVerdict, FixedClock, RuleRegistry, SystemClock,
    TriggerCheck, TriggerRule,
};
pub use error::{Result, ServiceError};
pub use platform::{LookupError, LookupProvider, PlatformLookup};
pub use state::AppState;
