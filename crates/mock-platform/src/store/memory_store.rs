//! 内存存储
//!
//! 基于 DashMap 的并发存储，记录按主键索引，并可按所属会员筛选。

use dashmap::DashMap;
use std::sync::Arc;

/// 可存入 `MemoryStore` 的记录
pub trait Record: Clone + Send + Sync + 'static {
    /// 主键
    fn key(&self) -> &str;

    /// 所属会员 ID
    fn owner(&self) -> &str;
}

/// 通用内存存储
///
/// 克隆得到的实例共享同一份数据
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<String, T>>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// 插入或覆盖记录
    pub fn upsert(&self, item: T) {
        self.data.insert(item.key().to_string(), item);
    }

    /// 返回记录的克隆，不持有锁
    pub fn get(&self, key: &str) -> Option<T> {
        self.data.get(key).map(|v| v.clone())
    }

    /// 某个会员的全部记录，按主键排序
    pub fn list_for(&self, owner: &str) -> Vec<T> {
        self.list_by(|item| item.owner() == owner)
    }

    /// 按条件筛选，按主键排序
    pub fn list_by<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self
            .data
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.key().cmp(b.key()));
        items
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn clear(&self) {
        self.data.clear();
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
