//! 测试数据生成器
//!
//! 固定演示会员便于手工联调，随机会员用于压测和观察分布。

use tracing::info;

use crate::models::{MembershipStatus, MockMember, MockMembership, MockOrder, PaymentStatus};
use crate::services::PlatformState;

/// 固定演示会员 ID
pub const DEMO_MEMBERS: [&str; 3] = ["member-active", "member-canceled", "member-buyer"];

/// 生成统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub members: usize,
    pub memberships: usize,
    pub orders: usize,
}

impl GenerationStats {
    pub fn from_state(state: &PlatformState) -> Self {
        Self {
            members: state.members.count(),
            memberships: state.memberships.count(),
            orders: state.orders.count(),
        }
    }
}

/// 数据生成器
pub struct DataGenerator {
    random_members: usize,
}

impl DataGenerator {
    pub fn new(random_members: usize) -> Self {
        Self { random_members }
    }

    /// 写入演示会员和随机会员
    pub fn populate(&self, state: &PlatformState) -> GenerationStats {
        Self::populate_demo(state);

        for _ in 0..self.random_members {
            let member = MockMember::random();
            state.memberships.upsert(MockMembership::random(&member.id));
            for _ in 0..3 {
                state.orders.upsert(MockOrder::random(&member.id));
            }
            state.members.upsert(member);
        }

        let stats = GenerationStats::from_state(state);
        info!(
            members = stats.members,
            memberships = stats.memberships,
            orders = stats.orders,
            "数据预填充完成"
        );
        stats
    }

    /// 演示会员：
    /// - `member-active`：一个 ACTIVE 计划
    /// - `member-canceled`：只有 CANCELED 计划
    /// - `member-buyer`：没有计划，一笔已支付订单和一笔已退款订单
    pub fn populate_demo(state: &PlatformState) {
        let [active, canceled, buyer] = DEMO_MEMBERS;

        state.members.upsert(MockMember::new(active, "Avery Active"));
        state
            .memberships
            .upsert(MockMembership::new(active, MembershipStatus::Active, "Gold"));

        state.members.upsert(MockMember::new(canceled, "Casey Canceled"));
        state.memberships.upsert(MockMembership::new(
            canceled,
            MembershipStatus::Canceled,
            "Silver",
        ));

        state.members.upsert(MockMember::new(buyer, "Blake Buyer"));
        state
            .orders
            .upsert(MockOrder::new(buyer, PaymentStatus::Paid, 42.0));
        state
            .orders
            .upsert(MockOrder::new(buyer, PaymentStatus::Refunded, 18.0));
    }
}
