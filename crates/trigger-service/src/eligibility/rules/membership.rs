//! 依赖平台查询的规则
//!
//! 查询失败（网络错误、会员不存在、响应异常、超时）一律判定为不符合条件，
//! 但与 "查询成功但没有匹配记录" 分开记录日志和指标。

use async_trait::async_trait;
use discount_shared::observability::metrics::record_platform_lookup;
use tracing::{debug, info, warn};

use crate::eligibility::{RuleInput, TriggerRule};

/// 付费会员计划规则
///
/// 会员至少有一个 ACTIVE 状态的会员计划时符合条件
pub struct PaidPlanRule {
    trigger_id: String,
}

impl PaidPlanRule {
    pub fn new(trigger_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
        }
    }
}

#[async_trait]
impl TriggerRule for PaidPlanRule {
    fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    async fn is_eligible(&self, input: &RuleInput<'_>) -> bool {
        let Some(member_id) = input.ctx.member_id() else {
            debug!(trigger_id = %self.trigger_id, "匿名访客，跳过会员计划查询");
            return false;
        };

        match input.ctx.platform.list_memberships(member_id).await {
            Ok(memberships) => {
                let active = memberships.iter().filter(|m| m.is_active()).count();
                if active > 0 {
                    record_platform_lookup("memberships", "found");
                    debug!(member_id = %member_id, active, "会员存在有效付费计划");
                    true
                } else {
                    record_platform_lookup("memberships", "empty");
                    info!(
                        member_id = %member_id,
                        total = memberships.len(),
                        "会员没有有效付费计划"
                    );
                    false
                }
            }
            Err(e) => {
                record_platform_lookup("memberships", e.metric_outcome());
                warn!(
                    member_id = %member_id,
                    instance_id = %input.ctx.instance_id,
                    error = %e,
                    "会员计划查询失败，按不符合条件处理"
                );
                false
            }
        }
    }

    fn description(&self) -> &'static str {
        "Active Paid Plan Rule"
    }
}

/// 回头客规则
///
/// 会员至少有一笔已支付订单时符合条件
pub struct ReturningCustomerRule {
    trigger_id: String,
}

impl ReturningCustomerRule {
    pub fn new(trigger_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
        }
    }
}

#[async_trait]
impl TriggerRule for ReturningCustomerRule {
    fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    async fn is_eligible(&self, input: &RuleInput<'_>) -> bool {
        let Some(member_id) = input.ctx.member_id() else {
            return false;
        };

        match input.ctx.platform.list_paid_orders(member_id).await {
            // 平台侧已按支付状态过滤，这里再校验一次
            Ok(orders) if orders.iter().any(|o| o.is_paid()) => {
                record_platform_lookup("orders", "found");
                true
            }
            Ok(_) => {
                record_platform_lookup("orders", "empty");
                info!(member_id = %member_id, "会员没有已支付订单");
                false
            }
            Err(e) => {
                record_platform_lookup("orders", e.metric_outcome());
                warn!(
                    member_id = %member_id,
                    instance_id = %input.ctx.instance_id,
                    error = %e,
                    "订单查询失败，按不符合条件处理"
                );
                false
            }
        }
    }

    fn description(&self) -> &'static str {
        "Returning Customer Rule"
    }
}
