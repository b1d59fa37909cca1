//! 触发器目录
//!
//! 进程级只读的触发器声明列表，用于响应平台的 list-triggers 调用。
//! 评估器不查询目录：没有注册规则的触发器 ID 一律视为不符合条件。

use serde::Serialize;

/// 触发器定义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerDefinition {
    /// 稳定且唯一的触发器 ID
    pub id: &'static str,
    /// 商家后台展示的名称
    pub name: &'static str,
}

pub const PAID_PLAN_DISCOUNT: &str = "paid-plan-discount";
pub const RETURNING_CUSTOMER_DISCOUNT: &str = "returning-customer-discount";
pub const HAPPY_HOUR_DISCOUNT: &str = "happy-hour-discount";
pub const WEEKEND_DISCOUNT: &str = "weekend-discount";
pub const MEMBERS_ONLY_DISCOUNT: &str = "members-only-discount";

static DEFINITIONS: [TriggerDefinition; 5] = [
    TriggerDefinition {
        id: PAID_PLAN_DISCOUNT,
        name: "Customer with Active Paid Plan",
    },
    TriggerDefinition {
        id: RETURNING_CUSTOMER_DISCOUNT,
        name: "Returning Customer with a Paid Order",
    },
    TriggerDefinition {
        id: HAPPY_HOUR_DISCOUNT,
        name: "Weekday Happy Hour",
    },
    TriggerDefinition {
        id: WEEKEND_DISCOUNT,
        name: "Weekend Shopper",
    },
    TriggerDefinition {
        id: MEMBERS_ONLY_DISCOUNT,
        name: "Logged-in Site Member",
    },
];

/// 触发器目录
#[derive(Debug, Clone, Copy)]
pub struct TriggerCatalog {
    definitions: &'static [TriggerDefinition],
}

/// 全局目录实例
pub static TRIGGER_CATALOG: TriggerCatalog = TriggerCatalog {
    definitions: &DEFINITIONS,
};

impl TriggerCatalog {
    /// 返回所有声明的触发器，每次调用结果相同
    pub fn list_triggers(&self) -> &'static [TriggerDefinition] {
        self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'static TriggerDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }
}
