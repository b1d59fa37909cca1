//! 插件协议响应 DTO 定义

use serde::Serialize;

use crate::catalog::TriggerDefinition;
use crate::eligibility::EligibilityVerdict;

/// 触发器目录项
#[derive(Debug, Clone, Serialize)]
pub struct CustomTriggerDto {
    pub id: String,
    pub name: String,
}

impl From<&TriggerDefinition> for CustomTriggerDto {
    fn from(def: &TriggerDefinition) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
        }
    }
}

/// 列出触发器响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTriggersResponse {
    pub custom_triggers: Vec<CustomTriggerDto>,
}

impl ListTriggersResponse {
    pub fn from_catalog(triggers: &[TriggerDefinition]) -> Self {
        Self {
            custom_triggers: triggers.iter().map(CustomTriggerDto::from).collect(),
        }
    }
}

/// 查询有效触发器响应
///
/// 不符合条件的触发器不出现在列表中
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEligibleTriggersResponse {
    pub eligible_triggers: Vec<EligibilityVerdict>,
}
