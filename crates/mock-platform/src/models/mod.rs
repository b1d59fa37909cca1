//! 模拟平台数据模型
//!
//! 序列化格式与平台会员 / 订单 API 一致

mod member;
mod membership;
mod order;

pub use member::MockMember;
pub use membership::{MembershipStatus, MockMembership};
pub use order::{MockOrder, PaymentStatus};
