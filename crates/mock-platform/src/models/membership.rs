//! 会员计划

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// 会员计划状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Active,
    Pending,
    Paused,
    Canceled,
    Ended,
}

impl MembershipStatus {
    /// 随机状态，ACTIVE 约占一半
    pub fn random() -> Self {
        match rand::rng().random_range(0..10) {
            0..=4 => Self::Active,
            5 => Self::Pending,
            6 => Self::Paused,
            7 | 8 => Self::Canceled,
            _ => Self::Ended,
        }
    }
}

const PLAN_NAMES: [&str; 4] = ["Silver", "Gold", "Platinum", "Annual VIP"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockMembership {
    pub id: String,
    /// 存储内部使用，不出现在响应里
    #[serde(skip)]
    pub member_id: String,
    pub status: MembershipStatus,
    pub plan_name: String,
    pub created_at: DateTime<Utc>,
}

impl MockMembership {
    pub fn new(member_id: &str, status: MembershipStatus, plan_name: impl Into<String>) -> Self {
        Self {
            id: format!("MS-{}", Uuid::new_v4()),
            member_id: member_id.to_string(),
            status,
            plan_name: plan_name.into(),
            created_at: Utc::now(),
        }
    }

    pub fn random(member_id: &str) -> Self {
        let plan = PLAN_NAMES[rand::rng().random_range(0..PLAN_NAMES.len())];
        Self::new(member_id, MembershipStatus::random(), plan)
    }
}

impl Record for MockMembership {
    fn key(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> &str {
        &self.member_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let ms = MockMembership::new("m1", MembershipStatus::Active, "Gold");
        let value = serde_json::to_value(&ms).unwrap();

        assert_eq!(value["status"], "ACTIVE");
        assert_eq!(value["planName"], "Gold");
        assert!(value.get("memberId").is_none());
        assert!(value["id"].as_str().unwrap().starts_with("MS-"));
    }

    #[test]
    fn test_random_membership() {
        let ms = MockMembership::random("m1");
        assert_eq!(ms.member_id, "m1");
        assert!(PLAN_NAMES.contains(&ms.plan_name.as_str()));
    }
}
