//! 站点会员

use chrono::{DateTime, Utc};
use fake::Fake;
use fake::faker::name::en::Name;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockMember {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl MockMember {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// 随机姓名的会员
    pub fn random() -> Self {
        Self::new(format!("member-{}", Uuid::new_v4()), Name().fake::<String>())
    }
}

impl Record for MockMember {
    fn key(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> &str {
        &self.id
    }
}
