//! 路由配置模块
//!
//! 定义插件端点的路由映射和中间件装配

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use discount_shared::observability::middleware as obs_middleware;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::{handlers, state::AppState};

/// 直连 JSON 接口
pub fn plugin_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/list-triggers", post(handlers::triggers::list_triggers))
        .route(
            "/v1/get-eligible-triggers",
            post(handlers::triggers::get_eligible_triggers),
        )
        .route(
            "/plugins-and-webhooks/{*path}",
            post(handlers::plugin::dispatch),
        )
}

/// 按逗号分隔的来源列表构造 CORS，`*` 表示任意来源
pub fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins.trim() == "*" {
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", allowed_origins);
    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 组装完整应用
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(plugin_routes())
        .route("/health", get(handlers::health::health_check))
        // 已注册路径上的其他方法同样提示入口，而不是空的 405
        .method_not_allowed_fallback(handlers::fallback::not_found)
        .fallback(handlers::fallback::not_found)
        .layer(cors)
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
