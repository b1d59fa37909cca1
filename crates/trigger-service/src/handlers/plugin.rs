//! 服务插件统一入口
//!
//! 平台把所有插件调用发到 `/plugins-and-webhooks/*`，按路径末段分发

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::triggers::{run_get_eligible_triggers, run_list_triggers};
use crate::error::{Result, ServiceError};
use crate::handlers::PluginPayload;
use crate::state::AppState;

/// 插件操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginOperation {
    ListTriggers,
    GetEligibleTriggers,
}

impl PluginOperation {
    /// 取路径最后一段匹配操作
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/').rsplit('/').next()? {
            "list-triggers" => Some(Self::ListTriggers),
            "get-eligible-triggers" => Some(Self::GetEligibleTriggers),
            _ => None,
        }
    }
}

/// 插件调用分发
///
/// POST /plugins-and-webhooks/{*path}
///
/// 先识别操作再解码请求体，未知操作不受请求体格式影响
pub async fn dispatch(
    State(state): State<AppState>,
    Path(path): Path<String>,
    payload: std::result::Result<PluginPayload, ServiceError>,
) -> Result<Response> {
    let operation = PluginOperation::from_path(&path)
        .ok_or_else(|| ServiceError::UnsupportedOperation(path.clone()))?;
    let payload = payload?;

    let response = match operation {
        PluginOperation::ListTriggers => Json(run_list_triggers(&state, payload)?).into_response(),
        PluginOperation::GetEligibleTriggers => {
            Json(run_get_eligible_triggers(&state, payload).await?).into_response()
        }
    };

    Ok(response)
}
