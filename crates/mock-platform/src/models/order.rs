//! 订单

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// 订单支付状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    NotPaid,
    Pending,
    Refunded,
    PartiallyRefunded,
}

impl PaymentStatus {
    /// 随机状态，PAID 占比最高
    pub fn random() -> Self {
        match rand::rng().random_range(0..10) {
            0..=5 => Self::Paid,
            6 => Self::NotPaid,
            7 => Self::Pending,
            8 => Self::Refunded,
            _ => Self::PartiallyRefunded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockOrder {
    pub id: String,
    #[serde(skip)]
    pub member_id: String,
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl MockOrder {
    pub fn new(member_id: &str, payment_status: PaymentStatus, total_amount: f64) -> Self {
        Self {
            id: format!("ORD-{}", Uuid::new_v4()),
            member_id: member_id.to_string(),
            payment_status,
            total_amount,
            currency: "USD".to_string(),
            created_at: Utc::now(),
        }
    }

    /// 随机金额和状态，创建时间在过去 30 天内
    pub fn random(member_id: &str) -> Self {
        let mut rng = rand::rng();
        let mut order = Self::new(
            member_id,
            PaymentStatus::random(),
            (rng.random_range(500..50_000) as f64) / 100.0,
        );
        order.created_at -= chrono::Duration::days(rng.random_range(0..30));
        order
    }
}

impl Record for MockOrder {
    fn key(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> &str {
        &self.member_id
    }
}
