//! 内存存储

mod memory_store;

pub use memory_store::{MemoryStore, Record};
