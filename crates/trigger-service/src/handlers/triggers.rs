//! 触发器 API 处理器
//!
//! 实现 list-triggers 与 get-eligible-triggers 两个插件操作

use axum::{Json, extract::State};
use tracing::info;

use crate::dto::{
    GetEligibleTriggersRequest, GetEligibleTriggersResponse, ListTriggersRequest,
    ListTriggersResponse,
};
use crate::error::Result;
use crate::handlers::PluginPayload;
use crate::state::AppState;

/// 列出触发器
///
/// POST /v1/list-triggers
pub async fn list_triggers(
    State(state): State<AppState>,
    payload: PluginPayload,
) -> Result<Json<ListTriggersResponse>> {
    Ok(Json(run_list_triggers(&state, payload)?))
}

/// 查询当前有效的触发器
///
/// POST /v1/get-eligible-triggers
pub async fn get_eligible_triggers(
    State(state): State<AppState>,
    payload: PluginPayload,
) -> Result<Json<GetEligibleTriggersResponse>> {
    Ok(Json(run_get_eligible_triggers(&state, payload).await?))
}

pub(crate) fn run_list_triggers(
    state: &AppState,
    payload: PluginPayload,
) -> Result<ListTriggersResponse> {
    let transport_id = payload.request_id.clone();
    let req: ListTriggersRequest = payload.parse()?;
    let metadata = req.metadata.unwrap_or_default();

    info!(
        request_id = ?metadata.request_id.or(transport_id),
        instance_id = ?metadata.instance_id,
        "列出触发器"
    );

    Ok(ListTriggersResponse::from_catalog(
        state.catalog.list_triggers(),
    ))
}

pub(crate) async fn run_get_eligible_triggers(
    state: &AppState,
    payload: PluginPayload,
) -> Result<GetEligibleTriggersResponse> {
    let transport_id = payload.request_id.clone();
    let from_token = payload.from_token;
    let req: GetEligibleTriggersRequest = payload.parse()?;
    let (metadata, checks) = req.into_parts()?;

    let request_id = metadata
        .request_id
        .clone()
        .or(transport_id)
        .unwrap_or_default();
    let instance_id = metadata.instance_id.clone().unwrap_or_default();

    info!(
        request_id = %request_id,
        instance_id = %instance_id,
        checks = checks.len(),
        from_token,
        "查询有效触发器"
    );

    let ctx = state.context_for(request_id, instance_id, metadata.member_id());
    let eligible_triggers = state.evaluator.evaluate(&ctx, &checks).await;

    Ok(GetEligibleTriggersResponse { eligible_triggers })
}
