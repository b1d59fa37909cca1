//! 触发器规则 Trait 定义

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::TriggerCheck;
use crate::context::RequestContext;

/// 规则评估输入
pub struct RuleInput<'a> {
    pub ctx: &'a RequestContext,
    pub check: &'a TriggerCheck,
    /// 本次评估的统一时刻
    pub now: DateTime<Utc>,
}

/// 触发器规则
///
/// 每个触发器 ID 对应一条规则，由 `RuleRegistry` 统一管理。
///
/// # 示例
///
/// ```ignore
/// struct AlwaysRule;
///
/// #[async_trait]
/// impl TriggerRule for AlwaysRule {
///     fn trigger_id(&self) -> &str {
///         "always"
///     }
///
///     async fn is_eligible(&self, _input: &RuleInput<'_>) -> bool {
///         true
///     }
/// }
/// ```
#[async_trait]
pub trait TriggerRule: Send + Sync {
    /// 规则对应的触发器 ID，用作注册表的 key
    fn trigger_id(&self) -> &str;

    /// 判定是否符合条件
    ///
    /// 规则不返回错误：外部查询失败等情况一律返回 false
    async fn is_eligible(&self, input: &RuleInput<'_>) -> bool;

    /// 规则描述（用于日志）
    fn description(&self) -> &'static str {
        "Generic Trigger Rule"
    }
}
