//! 单次请求上下文
//!
//! 每个入站调用构造一次，携带租户 ID、调用者身份和该租户的平台查询句柄。

use std::fmt;
use std::sync::Arc;

use crate::platform::PlatformLookup;

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub instance_id: String,
    /// 调用者会员 ID，匿名访客为 None
    pub member_id: Option<String>,
    pub platform: Arc<dyn PlatformLookup>,
}

impl RequestContext {
    pub fn new(
        request_id: impl Into<String>,
        instance_id: impl Into<String>,
        member_id: Option<String>,
        platform: Arc<dyn PlatformLookup>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            instance_id: instance_id.into(),
            // 空字符串按匿名处理
            member_id: member_id.filter(|id| !id.trim().is_empty()),
            platform,
        }
    }

    pub fn member_id(&self) -> Option<&str> {
        self.member_id.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("instance_id", &self.instance_id)
            .field("member_id", &self.member_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatformLookup;

    #[test]
    fn test_blank_member_id_is_anonymous() {
        let ctx = RequestContext::new(
            "req-1",
            "site-1",
            Some("  ".to_string()),
            Arc::new(MockPlatformLookup::new()),
        );
        assert!(ctx.member_id().is_none());
    }

    #[test]
    fn test_member_id_kept() {
        let ctx = RequestContext::new(
            "req-1",
            "site-1",
            Some("m1".to_string()),
            Arc::new(MockPlatformLookup::new()),
        );
        assert_eq!(ctx.member_id(), Some("m1"));
        assert!(format!("{:?}", ctx).contains("site-1"));
    }
}
