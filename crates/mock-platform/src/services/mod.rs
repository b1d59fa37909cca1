//! 模拟平台服务
//!
//! 会员计划与订单查询 API，以及用于准备测试数据的写入端点

mod membership_service;
mod order_service;

pub use membership_service::{CreateMembershipRequest, MembershipListResponse, membership_routes};
pub use order_service::{CreateOrderRequest, OrderListResponse, order_routes};

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde_json::{Value, json};
use tracing::warn;

use crate::models::{MockMember, MockMembership, MockOrder};
use crate::store::MemoryStore;

/// 平台共享状态
#[derive(Clone, Default)]
pub struct PlatformState {
    pub members: MemoryStore<MockMember>,
    pub memberships: MemoryStore<MockMembership>,
    pub orders: MemoryStore<MockOrder>,
    /// 设置后要求 `authorization` 头与之相等
    pub app_secret: Option<String>,
}

impl PlatformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_secret(mut self, secret: impl Into<String>) -> Self {
        self.app_secret = Some(secret.into());
        self
    }

    /// 确保会员存在，不存在时创建
    pub fn ensure_member(&self, member_id: &str) {
        if !self.members.contains(member_id) {
            self.members.upsert(MockMember::new(member_id, member_id));
        }
    }

    /// 校验调用凭证
    pub(crate) fn authorize(&self, headers: &HeaderMap) -> Result<(), StatusCode> {
        let Some(expected) = self.app_secret.as_deref() else {
            return Ok(());
        };

        let provided = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if provided == expected {
            Ok(())
        } else {
            warn!("凭证不匹配，拒绝请求");
            Err(StatusCode::UNAUTHORIZED)
        }
    }

    /// 查询类接口要求会员已存在
    pub(crate) fn require_member(&self, member_id: &str) -> Result<(), StatusCode> {
        if self.members.contains(member_id) {
            Ok(())
        } else {
            warn!(member_id = %member_id, "会员不存在");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// 组装完整的模拟平台路由
pub fn router(state: Arc<PlatformState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(membership_routes())
        .merge(order_routes())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mock-platform"
    }))
}
