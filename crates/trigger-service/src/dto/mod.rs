//! 插件协议 DTO 模块
//!
//! 平台请求与响应的数据传输对象，字段统一为 camelCase

pub mod request;
pub mod response;

pub use request::{
    EligibleTriggersPayload, GetEligibleTriggersRequest, Identity, ListTriggersRequest,
    RequestMetadata,
};
pub use response::{CustomTriggerDto, GetEligibleTriggersResponse, ListTriggersResponse};
