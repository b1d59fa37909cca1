//! 规则注册表
//!
//! 按触发器 ID 索引所有 TriggerRule 实例，提供统一的查找接口。
//!
//! ## 使用示例
//!
//! ```ignore
//! use discount_triggers::eligibility::{RuleRegistry, rules::MemberPresentRule};
//! use std::sync::Arc;
//!
//! let mut registry = RuleRegistry::new();
//! registry.register(Arc::new(MemberPresentRule::new("members-only-discount")));
//!
//! let rule = registry.get("members-only-discount").unwrap();
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use discount_shared::config::EligibilityConfig;
use tracing::{debug, info, warn};

use super::rule::TriggerRule;
use super::rules::{MemberPresentRule, PaidPlanRule, ReturningCustomerRule, ScheduleRule};
use crate::catalog::{
    HAPPY_HOUR_DISCOUNT, MEMBERS_ONLY_DISCOUNT, PAID_PLAN_DISCOUNT, RETURNING_CUSTOMER_DISCOUNT,
    WEEKEND_DISCOUNT,
};

/// 规则注册表
///
/// 构造后只读，可在多个请求间共享
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn TriggerRule>>,
}

impl RuleRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// 注册一条规则
    ///
    /// 按 `trigger_id()` 索引，已存在同 ID 的规则会被替换
    pub fn register(&mut self, rule: Arc<dyn TriggerRule>) -> &mut Self {
        let trigger_id = rule.trigger_id().to_string();
        debug!(
            trigger_id = %trigger_id,
            description = rule.description(),
            "注册触发器规则"
        );
        self.rules.insert(trigger_id, rule);
        self
    }

    /// 获取指定触发器的规则
    ///
    /// 返回 None 表示该触发器没有注册规则
    pub fn get(&self, trigger_id: &str) -> Option<Arc<dyn TriggerRule>> {
        self.rules.get(trigger_id).cloned()
    }

    pub fn contains(&self, trigger_id: &str) -> bool {
        self.rules.contains_key(trigger_id)
    }

    /// 已注册的触发器 ID（排序后）
    pub fn registered_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.rules.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 创建包含所有内置规则的注册表
    ///
    /// 目录中的每个触发器都对应一条规则
    pub fn with_defaults(config: &EligibilityConfig) -> Self {
        let offset = resolve_offset(config.utc_offset_minutes);
        check_hour_window(config.happy_hour_start, config.happy_hour_end);
        let mut registry = Self::new();

        registry
            .register(Arc::new(PaidPlanRule::new(PAID_PLAN_DISCOUNT)))
            .register(Arc::new(ReturningCustomerRule::new(
                RETURNING_CUSTOMER_DISCOUNT,
            )))
            .register(Arc::new(ScheduleRule::weekday_hours(
                HAPPY_HOUR_DISCOUNT,
                config.happy_hour_start,
                config.happy_hour_end,
                offset,
            )))
            .register(Arc::new(ScheduleRule::weekend(WEEKEND_DISCOUNT, offset)))
            .register(Arc::new(MemberPresentRule::new(MEMBERS_ONLY_DISCOUNT)));

        info!(
            rule_count = registry.len(),
            triggers = ?registry.registered_ids(),
            utc_offset = %offset,
            "触发器规则初始化完成"
        );

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults(&EligibilityConfig::default())
    }
}

/// 把分钟偏移换成 FixedOffset，越界时回退到 UTC
fn resolve_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| {
        warn!(utc_offset_minutes = minutes, "时区偏移越界，使用 UTC");
        Utc.fix()
    })
}

/// 时段为 [start, end) 小时，空区间或越界时规则永远不会命中
fn check_hour_window(start: u32, end: u32) -> bool {
    let valid = start < end && end <= 24;
    if !valid {
        warn!(
            happy_hour_start = start,
            happy_hour_end = end,
            "欢乐时段配置无效，happy-hour-discount 将始终不满足"
        );
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TRIGGER_CATALOG;
    use crate::eligibility::RuleInput;
    use async_trait::async_trait;

    struct FixedRule {
        id: &'static str,
        answer: bool,
    }

    #[async_trait]
    impl TriggerRule for FixedRule {
        fn trigger_id(&self) -> &str {
            self.id
        }

        async fn is_eligible(&self, _input: &RuleInput<'_>) -> bool {
            self.answer
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(PAID_PLAN_DISCOUNT).is_none());
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(FixedRule {
            id: "custom",
            answer: true,
        }));

        assert!(registry.contains("custom"));
        assert_eq!(registry.get("custom").unwrap().trigger_id(), "custom");
        assert_eq!(
            registry.get("custom").unwrap().description(),
            "Generic Trigger Rule"
        );
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Arc::new(FixedRule {
                id: "custom",
                answer: true,
            }))
            .register(Arc::new(FixedRule {
                id: "custom",
                answer: false,
            }));

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_defaults_cover_catalog() {
        let registry = RuleRegistry::default();

        assert_eq!(registry.len(), TRIGGER_CATALOG.len());
        for def in TRIGGER_CATALOG.list_triggers() {
            assert!(registry.contains(def.id), "missing rule for {}", def.id);
        }
    }

    #[test]
    fn test_check_hour_window() {
        assert!(check_hour_window(16, 18));
        assert!(check_hour_window(0, 24));
        assert!(!check_hour_window(18, 16));
        assert!(!check_hour_window(17, 17));
        assert!(!check_hour_window(20, 25));
    }

    #[test]
    fn test_resolve_offset() {
        assert_eq!(resolve_offset(90).local_minus_utc(), 5400);
        assert_eq!(resolve_offset(-300).local_minus_utc(), -18000);
        // 超过 ±24h 回退到 UTC
        assert_eq!(resolve_offset(10_000).local_minus_utc(), 0);
    }
}
