//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;
use std::time::Duration;

use discount_shared::config::AppConfig;
use tracing::warn;

use crate::catalog::{TRIGGER_CATALOG, TriggerCatalog};
use crate::context::RequestContext;
use crate::eligibility::{EligibilityEvaluator, RuleRegistry, SystemClock};
use crate::envelope::EnvelopeDecoder;
use crate::platform::{LookupProvider, TimeoutLookup};

/// Axum 应用共享状态
///
/// 全部只读，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub service_name: String,
    pub catalog: &'static TriggerCatalog,
    pub evaluator: Arc<EligibilityEvaluator>,
    /// 按租户构造平台查询句柄
    pub lookups: Arc<dyn LookupProvider>,
    pub envelope: Arc<EnvelopeDecoder>,
    /// 单次平台查询的超时
    pub lookup_timeout: Duration,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        service_name: impl Into<String>,
        evaluator: EligibilityEvaluator,
        lookups: Arc<dyn LookupProvider>,
        envelope: EnvelopeDecoder,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            catalog: &TRIGGER_CATALOG,
            evaluator: Arc::new(evaluator),
            lookups,
            envelope: Arc::new(envelope),
            lookup_timeout,
        }
    }

    /// 按配置装配状态，使用系统时钟
    pub fn from_config(config: &AppConfig, lookups: Arc<dyn LookupProvider>) -> anyhow::Result<Self> {
        let registry = RuleRegistry::with_defaults(&config.eligibility);
        let evaluator = EligibilityEvaluator::new(
            Arc::new(registry),
            Arc::new(SystemClock),
            config.eligibility.mode,
        );

        let envelope = EnvelopeDecoder::new(config.platform.public_key.as_deref())?;
        if !envelope.is_verified() {
            warn!("未配置平台公钥，webhook 令牌将不校验签名");
        }

        Ok(Self::new(
            config.service_name.clone(),
            evaluator,
            lookups,
            envelope,
            Duration::from_millis(config.platform.lookup_timeout_ms),
        ))
    }

    /// 构造单次请求的上下文
    ///
    /// 平台查询句柄统一加上超时
    pub fn context_for(
        &self,
        request_id: impl Into<String>,
        instance_id: impl Into<String>,
        member_id: Option<String>,
    ) -> RequestContext {
        let instance_id = instance_id.into();
        let platform = TimeoutLookup::wrap(
            self.lookups.for_instance(&instance_id),
            self.lookup_timeout,
        );

        RequestContext::new(request_id, instance_id, member_id, platform)
    }
}
