//! 插件协议请求 DTO 定义
//!
//! 候选触发器列表保持原始 JSON，逐项解析：单项格式错误只跳过该项

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::eligibility::TriggerCheck;
use crate::error::{Result, ServiceError};

/// 请求元数据
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub identity: Option<Identity>,
}

impl RequestMetadata {
    pub fn member_id(&self) -> Option<String> {
        self.identity.as_ref().and_then(|i| i.member_id.clone())
    }
}

/// 调用者身份
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// 类型不对时按匿名访客处理
    #[serde(default, deserialize_with = "lenient_string")]
    pub member_id: Option<String>,
}

/// 字符串字段宽松解析：非字符串值记录警告后视为缺失
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        None | Some(Value::Null) => Ok(None),
        Some(other) => {
            warn!(value = %other, "元数据字段不是字符串，按缺失处理");
            Ok(None)
        }
    }
}

/// 列出触发器请求
///
/// 请求体可以为空对象，元数据只用于日志
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTriggersRequest {
    #[serde(default)]
    pub metadata: Option<RequestMetadata>,
}

/// 查询有效触发器请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEligibleTriggersRequest {
    #[serde(default)]
    pub request: Option<EligibleTriggersPayload>,
    #[serde(default)]
    pub metadata: Option<RequestMetadata>,
}

/// 候选触发器列表
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleTriggersPayload {
    /// 缺失按空列表处理
    #[serde(default)]
    pub triggers: Option<Vec<Value>>,
}

impl GetEligibleTriggersRequest {
    /// 拆出元数据和检查项
    ///
    /// `request` 或 `metadata` 缺失时返回 InvalidInput
    pub fn into_parts(self) -> Result<(RequestMetadata, Vec<TriggerCheck>)> {
        let request = self
            .request
            .ok_or_else(|| ServiceError::InvalidInput("缺少 request 字段".to_string()))?;
        let metadata = self
            .metadata
            .ok_or_else(|| ServiceError::InvalidInput("缺少 metadata 字段".to_string()))?;

        let checks = request
            .triggers
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let check = parse_check(raw);
                if check.is_none() {
                    warn!(index, "候选触发器缺少 customTrigger.id，已跳过");
                }
                check
            })
            .collect();

        Ok((metadata, checks))
    }
}

/// 解析单个候选触发器
///
/// 触发器 ID 取 `customTrigger.id`，兼容 `customTrigger._id`；
/// `identifier` 缺失时回传 null
pub fn parse_check(raw: &Value) -> Option<TriggerCheck> {
    let trigger = raw.get("customTrigger")?;
    let trigger_id = trigger
        .get("id")
        .or_else(|| trigger.get("_id"))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())?;

    let identifier = raw.get("identifier").cloned().unwrap_or(Value::Null);

    Some(TriggerCheck::new(trigger_id, identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_request() {
        let body = json!({
            "request": {
                "triggers": [
                    {"customTrigger": {"id": "paid-plan-discount"}, "identifier": "a"},
                    {"customTrigger": {"_id": "weekend-discount"}, "identifier": {"k": 1}}
                ]
            },
            "metadata": {
                "requestId": "req-1",
                "instanceId": "site-1",
                "identity": {"memberId": "m1"}
            }
        });

        let req: GetEligibleTriggersRequest = serde_json::from_value(body).unwrap();
        let (metadata, checks) = req.into_parts().unwrap();

        assert_eq!(metadata.request_id.as_deref(), Some("req-1"));
        assert_eq!(metadata.instance_id.as_deref(), Some("site-1"));
        assert_eq!(metadata.member_id().as_deref(), Some("m1"));
        assert_eq!(
            checks,
            vec![
                TriggerCheck::new("paid-plan-discount", json!("a")),
                TriggerCheck::new("weekend-discount", json!({"k": 1})),
            ]
        );
    }

    #[test]
    fn test_missing_triggers_is_zero_checks() {
        let body = json!({"request": {}, "metadata": {"instanceId": "site-1"}});

        let req: GetEligibleTriggersRequest = serde_json::from_value(body).unwrap();
        let (metadata, checks) = req.into_parts().unwrap();

        assert!(checks.is_empty());
        assert!(metadata.member_id().is_none());
    }

    #[test]
    fn test_missing_request_or_metadata() {
        let no_request: GetEligibleTriggersRequest =
            serde_json::from_value(json!({"metadata": {}})).unwrap();
        assert!(matches!(
            no_request.into_parts(),
            Err(ServiceError::InvalidInput(_))
        ));

        let no_metadata: GetEligibleTriggersRequest =
            serde_json::from_value(json!({"request": {"triggers": []}})).unwrap();
        assert!(matches!(
            no_metadata.into_parts(),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_malformed_checks_are_skipped() {
        let body = json!({
            "request": {
                "triggers": [
                    "not-an-object",
                    {"identifier": "no-trigger"},
                    {"customTrigger": {"id": 42}},
                    {"customTrigger": {"id": ""}},
                    {"customTrigger": {"id": "members-only-discount"}}
                ]
            },
            "metadata": {}
        });

        let req: GetEligibleTriggersRequest = serde_json::from_value(body).unwrap();
        let (_, checks) = req.into_parts().unwrap();

        assert_eq!(
            checks,
            vec![TriggerCheck::new("members-only-discount", Value::Null)]
        );
    }

    #[test]
    fn test_mistyped_metadata_fields_are_ignored() {
        let body = json!({
            "request": {"triggers": [{"customTrigger": {"id": "members-only-discount"}}]},
            "metadata": {
                "requestId": 7,
                "instanceId": "site-1",
                "identity": {"memberId": {"nested": true}}
            }
        });

        let req: GetEligibleTriggersRequest = serde_json::from_value(body).unwrap();
        let (metadata, checks) = req.into_parts().unwrap();

        assert!(metadata.request_id.is_none());
        assert_eq!(metadata.instance_id.as_deref(), Some("site-1"));
        assert!(metadata.member_id().is_none());
        assert_eq!(checks.len(), 1);
    }

    #[test]
    fn test_list_request_accepts_empty_body() {
        let req: ListTriggersRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.metadata.is_none());
    }
}
