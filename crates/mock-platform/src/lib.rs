//! 模拟宿主平台
//!
//! 提供会员计划与订单查询 API 的内存实现，用于本地联调和客户端集成测试。
//!
//! # 使用示例
//!
//! ```rust
//! use std::sync::Arc;
//! use mock_platform::generators::DataGenerator;
//! use mock_platform::services::{PlatformState, router};
//!
//! let state = PlatformState::new();
//! DataGenerator::populate_demo(&state);
//! let app = router(Arc::new(state));
//! ```

pub mod cli;
pub mod generators;
pub mod models;
pub mod services;
pub mod store;
