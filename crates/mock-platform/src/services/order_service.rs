//! Mock 订单服务
//!
//! 模拟平台 ecom API：按会员和支付状态查询订单。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::PlatformState;
use crate::models::{MockOrder, PaymentStatus};

/// 创建订单请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

/// 订单列表查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub payment_status: Option<PaymentStatus>,
}

/// 订单列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<MockOrder>,
}

pub fn order_routes() -> Router<Arc<PlatformState>> {
    Router::new().route(
        "/ecom/v1/members/{member_id}/orders",
        get(list_orders).post(create_order),
    )
}

/// 查询会员订单，可按支付状态筛选
///
/// GET /ecom/v1/members/{member_id}/orders?paymentStatus=PAID
async fn list_orders(
    State(state): State<Arc<PlatformState>>,
    Path(member_id): Path<String>,
    Query(query): Query<ListOrdersQuery>,
    headers: HeaderMap,
) -> Result<Json<OrderListResponse>, StatusCode> {
    state.authorize(&headers)?;
    state.require_member(&member_id)?;

    let orders = state.orders.list_by(|order| {
        order.member_id == member_id
            && query
                .payment_status
                .is_none_or(|status| order.payment_status == status)
    });
    info!(
        member_id = %member_id,
        payment_status = ?query.payment_status,
        count = orders.len(),
        "查询订单"
    );

    Ok(Json(OrderListResponse { orders }))
}

/// 为会员添加订单，会员不存在时自动注册
///
/// POST /ecom/v1/members/{member_id}/orders
async fn create_order(
    State(state): State<Arc<PlatformState>>,
    Path(member_id): Path<String>,
    Json(req): Json<CreateOrderRequest>,
) -> (StatusCode, Json<MockOrder>) {
    state.ensure_member(&member_id);

    let order = MockOrder::new(
        &member_id,
        req.payment_status,
        req.total_amount.unwrap_or(99.0),
    );
    state.orders.upsert(order.clone());
    info!(member_id = %member_id, status = ?order.payment_status, "添加订单");

    (StatusCode::CREATED, Json(order))
}
