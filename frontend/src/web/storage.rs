//! 持久化存储封装模块
//!
//! `SessionStorage` 是会话存储的注入点：浏览器中使用 localStorage，
//! localStorage 不可用（隐私模式等）或测试时使用内存实现。

use std::collections::HashMap;
use std::sync::Mutex;

use gloo_storage::Storage;

/// 字符串键值存储
///
/// 写入失败只返回 `false`，由调用方决定是否记录日志。
pub trait SessionStorage: Send + Sync {
    /// 读取键对应的值，不存在或出错时返回 `None`
    fn read(&self, key: &str) -> Option<String>;

    /// 写入值，返回是否成功
    fn write(&self, key: &str, value: &str) -> bool;

    /// 删除键，返回是否成功
    fn remove(&self, key: &str) -> bool;
}

/// 浏览器 localStorage
pub struct BrowserStorage;

impl BrowserStorage {
    /// 仅当当前窗口提供 localStorage 时返回实例
    pub fn detect() -> Option<Self> {
        web_sys::window()?.local_storage().ok()??;
        Some(Self)
    }
}

impl SessionStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        gloo_storage::LocalStorage::raw().get_item(key).ok()?
    }

    fn write(&self, key: &str, value: &str) -> bool {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .is_ok()
    }

    fn remove(&self, key: &str) -> bool {
        gloo_storage::LocalStorage::raw().remove_item(key).is_ok()
    }
}

/// 进程内存储，标签页关闭即丢失
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.remove(key);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_read_write_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("k"), None);
        assert!(storage.write("k", "v1"));
        assert!(storage.write("k", "v2"));
        assert_eq!(storage.read("k").as_deref(), Some("v2"));
        assert!(storage.remove("k"));
        assert_eq!(storage.read("k"), None);
        // 删除不存在的键也视为成功
        assert!(storage.remove("k"));
    }
}
