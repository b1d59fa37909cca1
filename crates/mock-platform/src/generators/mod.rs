//! 测试数据生成器

mod data_generator;

pub use data_generator::{DEMO_MEMBERS, DataGenerator, GenerationStats};
