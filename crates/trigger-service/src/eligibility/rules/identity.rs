//! 身份类规则

use async_trait::async_trait;

use crate::eligibility::{RuleInput, TriggerRule};

/// 登录会员即符合条件，不做外部查询
pub struct MemberPresentRule {
    trigger_id: String,
}

impl MemberPresentRule {
    pub fn new(trigger_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
        }
    }
}

#[async_trait]
impl TriggerRule for MemberPresentRule {
    fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    async fn is_eligible(&self, input: &RuleInput<'_>) -> bool {
        input.ctx.member_id().is_some()
    }

    fn description(&self) -> &'static str {
        "Member Present Rule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RequestContext;
    use crate::eligibility::TriggerCheck;
    use crate::platform::MockPlatformLookup;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;

    async fn run(member_id: Option<&str>) -> bool {
        // 不允许任何平台调用
        let ctx = RequestContext::new(
            "req",
            "site",
            member_id.map(String::from),
            Arc::new(MockPlatformLookup::new()),
        );
        let check = TriggerCheck::new("members-only-discount", json!("a"));
        let input = RuleInput {
            ctx: &ctx,
            check: &check,
            now: Utc::now(),
        };
        MemberPresentRule::new("members-only-discount")
            .is_eligible(&input)
            .await
    }

    #[tokio::test]
    async fn test_member_present() {
        assert!(run(Some("m1")).await);
    }

    #[tokio::test]
    async fn test_anonymous_visitor() {
        assert!(!run(None).await);
    }
}
