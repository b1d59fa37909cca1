//! 服务错误类型定义
//!
//! 只包含会暴露给调用方的错误。外部查询失败、未知触发器等在评估器内部降级为
//! "不符合条件"，不会出现在这里。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("请求格式无效: {0}")]
    InvalidInput(String),

    #[error("令牌无效: {0}")]
    InvalidToken(String),

    #[error("不支持的插件操作: {0}")]
    UnsupportedOperation(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl ServiceError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::UnsupportedOperation(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::UnsupportedOperation(_) => "UNSUPPORTED_OPERATION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!(code = other.error_code(), error = %other, "请求被拒绝");
                other.to_string()
            }
        };

        let body = json!({
            "code": self.error_code(),
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 JSON 反序列化错误转换
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("JSON 解析失败: {}", err))
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ServiceError>;
