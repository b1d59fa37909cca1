//! Mock 会员计划服务
//!
//! 模拟平台 members API：按会员查询会员计划，并提供写入端点。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::PlatformState;
use crate::models::{MembershipStatus, MockMember, MockMembership};

/// 创建会员请求
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub id: String,
    pub name: Option<String>,
}

/// 创建会员计划请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMembershipRequest {
    pub status: MembershipStatus,
    pub plan_name: Option<String>,
}

/// 会员计划列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipListResponse {
    pub memberships: Vec<MockMembership>,
}

pub fn membership_routes() -> Router<Arc<PlatformState>> {
    Router::new()
        .route("/members/v1/members", post(create_member))
        .route(
            "/members/v1/members/{member_id}/memberships",
            get(list_memberships),
        )
        .route(
            "/members/v1/members/{member_id}/memberships",
            post(create_membership),
        )
}

/// 注册会员
///
/// POST /members/v1/members
async fn create_member(
    State(state): State<Arc<PlatformState>>,
    Json(req): Json<CreateMemberRequest>,
) -> (StatusCode, Json<MockMember>) {
    let member = MockMember::new(&req.id, req.name.unwrap_or_else(|| req.id.clone()));
    state.members.upsert(member.clone());
    info!(member_id = %member.id, "注册会员");
    (StatusCode::CREATED, Json(member))
}

/// 查询会员的全部会员计划
///
/// GET /members/v1/members/{member_id}/memberships
async fn list_memberships(
    State(state): State<Arc<PlatformState>>,
    Path(member_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MembershipListResponse>, StatusCode> {
    state.authorize(&headers)?;
    state.require_member(&member_id)?;

    let memberships = state.memberships.list_for(&member_id);
    info!(member_id = %member_id, count = memberships.len(), "查询会员计划");

    Ok(Json(MembershipListResponse { memberships }))
}

/// 为会员添加会员计划，会员不存在时自动注册
///
/// POST /members/v1/members/{member_id}/memberships
async fn create_membership(
    State(state): State<Arc<PlatformState>>,
    Path(member_id): Path<String>,
    Json(req): Json<CreateMembershipRequest>,
) -> (StatusCode, Json<MockMembership>) {
    state.ensure_member(&member_id);

    let membership = MockMembership::new(
        &member_id,
        req.status,
        req.plan_name.unwrap_or_else(|| "Gold".to_string()),
    );
    state.memberships.upsert(membership.clone());
    info!(member_id = %member_id, status = ?membership.status, "添加会员计划");

    (StatusCode::CREATED, Json(membership))
}
