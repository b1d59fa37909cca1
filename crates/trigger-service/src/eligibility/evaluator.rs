//! 资格评估器
//!
//! 按输入顺序逐项分发到规则，收集符合条件的检查项。
//!
//! ## 设计说明
//!
//! 1. 评估开始时读取一次时钟，所有规则共用同一时刻
//! 2. 按触发器 ID 在注册表中查找规则，找不到即不符合条件
//! 3. 顺序模式逐项 await；并发模式用 `join_all` 同时评估，结果仍按输入顺序输出
//! 4. 单项失败只影响该项，不会中断同一请求中的其他检查项

use std::sync::Arc;

use chrono::{DateTime, Utc};
use discount_shared::config::EvaluationMode;
use discount_shared::observability::metrics::record_trigger_check;
use futures::future::join_all;
use tracing::{debug, info, instrument};

use super::clock::Clock;
use super::registry::RuleRegistry;
use super::rule::RuleInput;
use super::{EligibilityVerdict, TriggerCheck};
use crate::context::RequestContext;

pub struct EligibilityEvaluator {
    registry: Arc<RuleRegistry>,
    clock: Arc<dyn Clock>,
    mode: EvaluationMode,
}

impl EligibilityEvaluator {
    pub fn new(registry: Arc<RuleRegistry>, clock: Arc<dyn Clock>, mode: EvaluationMode) -> Self {
        Self {
            registry,
            clock,
            mode,
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// 评估一组检查项，返回符合条件的判定
    ///
    /// 输出是输入的子集，顺序与输入一致；本方法从不失败
    #[instrument(
        skip(self, ctx, checks),
        fields(
            request_id = %ctx.request_id,
            instance_id = %ctx.instance_id,
            checks = checks.len(),
            mode = ?self.mode
        )
    )]
    pub async fn evaluate(
        &self,
        ctx: &RequestContext,
        checks: &[TriggerCheck],
    ) -> Vec<EligibilityVerdict> {
        if checks.is_empty() {
            return Vec::new();
        }

        let now = self.clock.now();

        let outcomes = match self.mode {
            EvaluationMode::Sequential => {
                let mut outcomes = Vec::with_capacity(checks.len());
                for check in checks {
                    outcomes.push(self.evaluate_one(ctx, check, now).await);
                }
                outcomes
            }
            EvaluationMode::Concurrent => {
                join_all(checks.iter().map(|check| self.evaluate_one(ctx, check, now))).await
            }
        };

        let verdicts: Vec<EligibilityVerdict> = outcomes.into_iter().flatten().collect();

        info!(
            eligible = verdicts.len(),
            member = ctx.member_id().is_some(),
            "触发器资格评估完成"
        );

        verdicts
    }

    async fn evaluate_one(
        &self,
        ctx: &RequestContext,
        check: &TriggerCheck,
        now: DateTime<Utc>,
    ) -> Option<EligibilityVerdict> {
        let Some(rule) = self.registry.get(&check.trigger_id) else {
            debug!(trigger_id = %check.trigger_id, "未注册的触发器，按不符合条件处理");
            record_trigger_check(&check.trigger_id, "unknown");
            return None;
        };

        let input = RuleInput { ctx, check, now };

        if rule.is_eligible(&input).await {
            record_trigger_check(&check.trigger_id, "eligible");
            Some(EligibilityVerdict::from(check))
        } else {
            record_trigger_check(&check.trigger_id, "ineligible");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        HAPPY_HOUR_DISCOUNT, MEMBERS_ONLY_DISCOUNT, PAID_PLAN_DISCOUNT, WEEKEND_DISCOUNT,
    };
    use crate::eligibility::FixedClock;
    use crate::platform::{LookupError, MembershipRecord, MembershipStatus, MockPlatformLookup};
    use chrono::TimeZone;
    use discount_shared::config::EligibilityConfig;
    use serde_json::json;

    /// 2024-05-15 周三 17:00 UTC
    fn wednesday_five_pm() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 17, 0, 0).unwrap()
    }

    /// 2024-05-18 周六 17:00 UTC
    fn saturday_five_pm() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 18, 17, 0, 0).unwrap()
    }

    fn evaluator(at: DateTime<Utc>, mode: EvaluationMode) -> EligibilityEvaluator {
        EligibilityEvaluator::new(
            Arc::new(RuleRegistry::with_defaults(&EligibilityConfig::default())),
            Arc::new(FixedClock::new(at)),
            mode,
        )
    }

    fn ctx(member_id: Option<&str>, mock: MockPlatformLookup) -> RequestContext {
        RequestContext::new("req-1", "site-1", member_id.map(String::from), Arc::new(mock))
    }

    fn active() -> Vec<MembershipRecord> {
        vec![MembershipRecord {
            id: "plan-1".to_string(),
            status: MembershipStatus::Active,
            plan_name: Some("Gold".to_string()),
        }]
    }

    #[tokio::test]
    async fn test_paid_plan_with_active_membership() {
        let mut mock = MockPlatformLookup::new();
        mock.expect_list_memberships().returning(|_| Ok(active()));

        let checks = vec![TriggerCheck::new(PAID_PLAN_DISCOUNT, json!("a"))];
        let verdicts = evaluator(wednesday_five_pm(), EvaluationMode::Sequential)
            .evaluate(&ctx(Some("m1"), mock), &checks)
            .await;

        assert_eq!(
            verdicts,
            vec![EligibilityVerdict {
                trigger_id: PAID_PLAN_DISCOUNT.to_string(),
                identifier: json!("a"),
            }]
        );
    }

    #[tokio::test]
    async fn test_paid_plan_with_no_membership() {
        let mut mock = MockPlatformLookup::new();
        mock.expect_list_memberships().returning(|_| Ok(vec![]));

        let checks = vec![TriggerCheck::new(PAID_PLAN_DISCOUNT, json!("a"))];
        let verdicts = evaluator(wednesday_five_pm(), EvaluationMode::Sequential)
            .evaluate(&ctx(Some("m1"), mock), &checks)
            .await;

        assert!(verdicts.is_empty());
    }

    #[tokio::test]
    async fn test_empty_checks() {
        let mut mock = MockPlatformLookup::new();
        mock.expect_list_memberships().never();

        let verdicts = evaluator(wednesday_five_pm(), EvaluationMode::Concurrent)
            .evaluate(&ctx(Some("m1"), mock), &[])
            .await;

        assert!(verdicts.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_trigger_does_not_affect_others() {
        let mock = MockPlatformLookup::new();

        let checks = vec![
            TriggerCheck::new("no-such-trigger", json!("x")),
            TriggerCheck::new(MEMBERS_ONLY_DISCOUNT, json!({"line": 1})),
        ];
        let verdicts = evaluator(wednesday_five_pm(), EvaluationMode::Sequential)
            .evaluate(&ctx(Some("m1"), mock), &checks)
            .await;

        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].trigger_id, MEMBERS_ONLY_DISCOUNT);
        assert_eq!(verdicts[0].identifier, json!({"line": 1}));
    }

    #[tokio::test]
    async fn test_lookup_failure_does_not_affect_others() {
        let checks = vec![
            TriggerCheck::new(PAID_PLAN_DISCOUNT, json!("a")),
            TriggerCheck::new(HAPPY_HOUR_DISCOUNT, json!("b")),
            TriggerCheck::new(MEMBERS_ONLY_DISCOUNT, json!("c")),
        ];

        for mode in [EvaluationMode::Sequential, EvaluationMode::Concurrent] {
            let mut mock = MockPlatformLookup::new();
            mock.expect_list_memberships()
                .returning(|_| Err(LookupError::Transport("reset".to_string())));

            let verdicts = evaluator(wednesday_five_pm(), mode)
                .evaluate(&ctx(Some("m1"), mock), &checks)
                .await;

            let ids: Vec<_> = verdicts.iter().map(|v| v.trigger_id.as_str()).collect();
            assert_eq!(ids, vec![HAPPY_HOUR_DISCOUNT, MEMBERS_ONLY_DISCOUNT]);
        }
    }

    #[tokio::test]
    async fn test_anonymous_never_gets_paid_plan() {
        let mut mock = MockPlatformLookup::new();
        mock.expect_list_memberships().never();

        let checks = vec![
            TriggerCheck::new(PAID_PLAN_DISCOUNT, json!("a")),
            TriggerCheck::new(MEMBERS_ONLY_DISCOUNT, json!("b")),
        ];
        let verdicts = evaluator(wednesday_five_pm(), EvaluationMode::Sequential)
            .evaluate(&ctx(None, mock), &checks)
            .await;

        assert!(verdicts.is_empty());
    }

    #[tokio::test]
    async fn test_clock_based_rules() {
        let checks = vec![
            TriggerCheck::new(HAPPY_HOUR_DISCOUNT, json!("h")),
            TriggerCheck::new(WEEKEND_DISCOUNT, json!("w")),
        ];

        let verdicts = evaluator(wednesday_five_pm(), EvaluationMode::Sequential)
            .evaluate(&ctx(None, MockPlatformLookup::new()), &checks)
            .await;
        let ids: Vec<_> = verdicts.iter().map(|v| v.trigger_id.as_str()).collect();
        assert_eq!(ids, vec![HAPPY_HOUR_DISCOUNT]);

        let verdicts = evaluator(saturday_five_pm(), EvaluationMode::Sequential)
            .evaluate(&ctx(None, MockPlatformLookup::new()), &checks)
            .await;
        let ids: Vec<_> = verdicts.iter().map(|v| v.trigger_id.as_str()).collect();
        assert_eq!(ids, vec![WEEKEND_DISCOUNT]);
    }

    #[tokio::test]
    async fn test_concurrent_preserves_input_order() {
        let mut mock = MockPlatformLookup::new();
        mock.expect_list_memberships().returning(|_| Ok(active()));

        let checks = vec![
            TriggerCheck::new(MEMBERS_ONLY_DISCOUNT, json!(1)),
            TriggerCheck::new(PAID_PLAN_DISCOUNT, json!(2)),
            TriggerCheck::new(MEMBERS_ONLY_DISCOUNT, json!(3)),
            TriggerCheck::new(HAPPY_HOUR_DISCOUNT, json!(4)),
        ];
        let verdicts = evaluator(wednesday_five_pm(), EvaluationMode::Concurrent)
            .evaluate(&ctx(Some("m1"), mock), &checks)
            .await;

        let identifiers: Vec<_> = verdicts.iter().map(|v| v.identifier.clone()).collect();
        assert_eq!(identifiers, vec![json!(1), json!(2), json!(3), json!(4)]);
    }

    #[tokio::test]
    async fn test_verdicts_are_subset_of_checks() {
        let mut mock = MockPlatformLookup::new();
        mock.expect_list_memberships().returning(|_| Ok(active()));
        mock.expect_list_paid_orders().returning(|_| Ok(vec![]));

        let checks: Vec<_> = [
            PAID_PLAN_DISCOUNT,
            "returning-customer-discount",
            HAPPY_HOUR_DISCOUNT,
            WEEKEND_DISCOUNT,
            MEMBERS_ONLY_DISCOUNT,
            "bogus",
        ]
        .iter()
        .enumerate()
        .map(|(i, id)| TriggerCheck::new(*id, json!(i)))
        .collect();

        let verdicts = evaluator(saturday_five_pm(), EvaluationMode::Sequential)
            .evaluate(&ctx(Some("m1"), mock), &checks)
            .await;

        assert!(verdicts.iter().all(|v| {
            checks
                .iter()
                .any(|c| c.trigger_id == v.trigger_id && c.identifier == v.identifier)
        }));
        assert_eq!(verdicts.len(), 3);
    }
}
