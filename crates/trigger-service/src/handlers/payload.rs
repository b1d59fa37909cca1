//! 插件请求体提取器
//!
//! 平台可能直接发送 JSON，也可能发送 text/plain 的 JWT 令牌。
//! 两种形式都归一为同一个 JSON 载荷，再由处理器解析为具体请求。

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use discount_shared::observability::middleware::RequestId;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ServiceError};
use crate::state::AppState;

/// 归一后的插件载荷
#[derive(Debug)]
pub struct PluginPayload {
    pub body: Value,
    /// 传输层请求 ID，载荷里没有 requestId 时使用
    pub request_id: Option<String>,
    /// 是否来自令牌
    pub from_token: bool,
}

impl PluginPayload {
    pub fn parse<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.body)?)
    }
}

impl FromRequest<AppState> for PluginPayload {
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self> {
        let request_id = req.extensions().get::<RequestId>().map(|id| id.0.clone());
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServiceError::InvalidInput(format!("读取请求体失败: {}", e)))?;

        let text = std::str::from_utf8(&bytes)
            .map_err(|_| ServiceError::InvalidInput("请求体不是 UTF-8".to_string()))?
            .trim();

        // 空请求体按空对象处理
        if text.is_empty() {
            return Ok(Self {
                body: Value::Object(Default::default()),
                request_id,
                from_token: false,
            });
        }

        if is_json || text.starts_with('{') {
            return Ok(Self {
                body: serde_json::from_str(text)?,
                request_id,
                from_token: false,
            });
        }

        let envelope = state.envelope.decode(text)?;
        Ok(Self {
            body: envelope.data().clone(),
            request_id,
            from_token: true,
        })
    }
}
