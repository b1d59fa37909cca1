//! 宿主平台 HTTP 查询客户端
//!
//! 通过平台 REST API 查询会员计划与订单。连接池在所有租户间共享，
//! 租户身份通过请求头传递。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use discount_shared::config::PlatformConfig;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{LookupError, LookupProvider, MembershipRecord, OrderRecord, PlatformLookup};

const APP_ID_HEADER: &str = "x-app-id";
const INSTANCE_ID_HEADER: &str = "x-instance-id";

#[derive(Debug, Deserialize)]
struct MembershipsResponse {
    #[serde(default)]
    memberships: Vec<MembershipRecord>,
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    #[serde(default)]
    orders: Vec<OrderRecord>,
}

/// 单租户的平台查询客户端
#[derive(Clone)]
pub struct HttpPlatformClient {
    http: reqwest::Client,
    base_url: Url,
    app_id: String,
    app_secret: String,
    instance_id: String,
    timeout_ms: u64,
}

impl HttpPlatformClient {
    /// 构建请求 URL，会员 ID 作为独立路径段编码
    fn endpoint(&self, segments: &[&str]) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::Transport(format!("无效的平台地址: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        member_id: &str,
    ) -> Result<T, LookupError> {
        debug!(url = %url, instance_id = %self.instance_id, "请求平台查询接口");

        let response = self
            .http
            .get(url)
            .query(query)
            .header(reqwest::header::AUTHORIZATION, &self.app_secret)
            .header(APP_ID_HEADER, &self.app_id)
            .header(INSTANCE_ID_HEADER, &self.instance_id)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(LookupError::NotFound {
                    member_id: member_id.to_string(),
                });
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LookupError::Unauthorized);
            }
            status => {
                return Err(LookupError::Upstream {
                    status: status.as_u16(),
                });
            }
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout {
                after_ms: self.timeout_ms,
            }
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl PlatformLookup for HttpPlatformClient {
    #[instrument(skip(self), fields(instance_id = %self.instance_id))]
    async fn list_memberships(
        &self,
        member_id: &str,
    ) -> Result<Vec<MembershipRecord>, LookupError> {
        let url = self.endpoint(&["members", "v1", "members", member_id, "memberships"])?;
        let body: MembershipsResponse = self.get_json(url, &[], member_id).await?;
        Ok(body.memberships)
    }

    #[instrument(skip(self), fields(instance_id = %self.instance_id))]
    async fn list_paid_orders(&self, member_id: &str) -> Result<Vec<OrderRecord>, LookupError> {
        let url = self.endpoint(&["ecom", "v1", "members", member_id, "orders"])?;
        let body: OrdersResponse = self
            .get_json(url, &[("paymentStatus", "PAID")], member_id)
            .await?;
        Ok(body.orders)
    }
}

/// 基于 HTTP 的租户客户端工厂
pub struct HttpLookupProvider {
    http: reqwest::Client,
    base_url: Url,
    app_id: String,
    app_secret: String,
    timeout_ms: u64,
}

impl HttpLookupProvider {
    pub fn new(config: &PlatformConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.lookup_timeout_ms))
            .user_agent(concat!("discount-triggers/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
            timeout_ms: config.lookup_timeout_ms,
        })
    }
}

impl LookupProvider for HttpLookupProvider {
    fn for_instance(&self, instance_id: &str) -> Arc<dyn PlatformLookup> {
        Arc::new(HttpPlatformClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            app_id: self.app_id.clone(),
            app_secret: self.app_secret.clone(),
            instance_id: instance_id.to_string(),
            timeout_ms: self.timeout_ms,
        })
    }
}
