//! 宿主平台查询接口
//!
//! 评估器只依赖这里定义的 trait：按会员 ID 查询会员计划和已支付订单。
//! 查询失败以 `LookupError` 显式返回，由规则在边界处降级为 "不符合条件"。

mod client;

pub use client::{HttpLookupProvider, HttpPlatformClient};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 会员计划状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Active,
    Pending,
    Paused,
    Canceled,
    Ended,
    /// 平台新增的、本服务尚不认识的状态
    #[serde(other)]
    Unknown,
}

/// 会员计划记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRecord {
    #[serde(default)]
    pub id: String,
    pub status: MembershipStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
}

impl MembershipRecord {
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

/// 订单支付状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    NotPaid,
    Pending,
    Refunded,
    PartiallyRefunded,
    #[serde(other)]
    Unknown,
}

/// 订单记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(default)]
    pub id: String,
    pub payment_status: PaymentStatus,
}

impl OrderRecord {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// 平台查询错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("平台请求失败: {0}")]
    Transport(String),

    #[error("平台查询超时: {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("会员不存在: {member_id}")]
    NotFound { member_id: String },

    #[error("平台凭证无效")]
    Unauthorized,

    #[error("平台返回错误状态: {status}")]
    Upstream { status: u16 },

    #[error("平台响应无法解析: {0}")]
    Malformed(String),
}

impl LookupError {
    /// 指标中的 outcome 标签
    pub fn metric_outcome(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            _ => "error",
        }
    }
}

/// 会员 / 订单查询接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformLookup: Send + Sync {
    /// 查询会员的全部会员计划
    async fn list_memberships(&self, member_id: &str)
    -> Result<Vec<MembershipRecord>, LookupError>;

    /// 查询会员的已支付订单
    async fn list_paid_orders(&self, member_id: &str) -> Result<Vec<OrderRecord>, LookupError>;
}

/// 按租户（instance）构造查询句柄
///
/// 每次请求调用一次，不在模块级缓存租户客户端
pub trait LookupProvider: Send + Sync {
    fn for_instance(&self, instance_id: &str) -> Arc<dyn PlatformLookup>;
}

/// 所有租户共用同一个查询句柄
///
/// 用于单租户部署和测试
pub struct SharedLookupProvider {
    lookup: Arc<dyn PlatformLookup>,
}

impl SharedLookupProvider {
    pub fn new(lookup: Arc<dyn PlatformLookup>) -> Self {
        Self { lookup }
    }
}

impl LookupProvider for SharedLookupProvider {
    fn for_instance(&self, _instance_id: &str) -> Arc<dyn PlatformLookup> {
        self.lookup.clone()
    }
}

/// 为每次查询加上超时
///
/// 超时视同查询失败，返回 `LookupError::Timeout`
pub struct TimeoutLookup {
    inner: Arc<dyn PlatformLookup>,
    timeout: Duration,
}

impl TimeoutLookup {
    pub fn wrap(inner: Arc<dyn PlatformLookup>, timeout: Duration) -> Arc<dyn PlatformLookup> {
        Arc::new(Self { inner, timeout })
    }

    fn elapsed(&self) -> LookupError {
        LookupError::Timeout {
            after_ms: self.timeout.as_millis() as u64,
        }
    }
}

#[async_trait]
impl PlatformLookup for TimeoutLookup {
    async fn list_memberships(
        &self,
        member_id: &str,
    ) -> Result<Vec<MembershipRecord>, LookupError> {
        tokio::time::timeout(self.timeout, self.inner.list_memberships(member_id))
            .await
            .map_err(|_| self.elapsed())?
    }

    async fn list_paid_orders(&self, member_id: &str) -> Result<Vec<OrderRecord>, LookupError> {
        tokio::time::timeout(self.timeout, self.inner.list_paid_orders(member_id))
            .await
            .map_err(|_| self.elapsed())?
    }
}
