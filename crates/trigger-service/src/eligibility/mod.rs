//! 资格评估模块
//!
//! 对平台传入的每个候选触发器给出是否符合条件的判定。
//!
//! ## 设计说明
//!
//! - 规则通过 `RuleRegistry` 按触发器 ID 注册，新增触发器只需注册新规则
//! - 没有注册规则的触发器 ID 视为不符合条件
//! - 规则内部吞掉外部查询错误，评估器本身从不返回错误
//! - 时钟通过 `Clock` 注入，同一次评估内所有规则看到同一时刻

mod clock;
mod evaluator;
mod registry;
mod rule;
pub mod rules;

pub use clock::{Clock, FixedClock, SystemClock};
pub use evaluator::EligibilityEvaluator;
pub use registry::RuleRegistry;
pub use rule::{RuleInput, TriggerRule};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 一项待评估的触发器
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerCheck {
    pub trigger_id: String,
    /// 调用方提供的不透明标识，原样回传
    pub identifier: Value,
}

impl TriggerCheck {
    pub fn new(trigger_id: impl Into<String>, identifier: Value) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            identifier,
        }
    }
}

/// 符合条件的触发器
///
/// 只有符合条件的检查项才会产生判定，不符合条件以缺席表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    #[serde(rename = "customTriggerId")]
    pub trigger_id: String,
    pub identifier: Value,
}

impl From<&TriggerCheck> for EligibilityVerdict {
    fn from(check: &TriggerCheck) -> Self {
        Self {
            trigger_id: check.trigger_id.clone(),
            identifier: check.identifier.clone(),
        }
    }
}
