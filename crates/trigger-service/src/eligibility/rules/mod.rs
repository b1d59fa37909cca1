//! 内置触发器规则
//!
//! - `membership`: 依赖平台查询的规则（付费计划、回头客）
//! - `schedule`: 只依赖评估时刻的规则（工作日时段、周末）
//! - `identity`: 只依赖调用者身份的规则

mod identity;
mod membership;
mod schedule;

pub use identity::MemberPresentRule;
pub use membership::{PaidPlanRule, ReturningCustomerRule};
pub use schedule::ScheduleRule;
