//! 兜底路由

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// 未匹配的路由提示正确的入口
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": "Service plugin endpoint is POST /plugins-and-webhooks/*",
        })),
    )
}
