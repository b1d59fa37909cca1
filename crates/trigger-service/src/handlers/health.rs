//! 健康检查

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    /// 目录中的触发器数量
    pub triggers: usize,
    pub timestamp: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        service: state.service_name.clone(),
        triggers: state.catalog.len(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
