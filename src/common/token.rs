use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::warn;

/// 持久化存储里 token 的固定 key
pub const TOKEN_KEY: &str = "jwt_token";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("IO操作失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("存储内容损坏: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// 单槽位 token 存储
///
/// 多线程宿主下对槽位的访问必须互斥，实现方自行加锁
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str) -> Result<(), TokenError>;

    fn remove(&self) -> Result<(), TokenError>;

    fn has(&self) -> bool {
        self.get().is_some()
    }
}

/// 文件落盘的 token 存储，进程重启后仍然有效
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(path: &Path) -> Result<HashMap<String, String>, TokenError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(path: &Path, entries: &HashMap<String, String>) -> Result<(), TokenError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string(entries)?)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match Self::load(&self.path) {
            Ok(entries) => entries.get(TOKEN_KEY).cloned(),
            Err(e) => {
                warn!("读取 token 存储失败: {}", e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), TokenError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = Self::load(&self.path)?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        Self::save(&self.path, &entries)
    }

    fn remove(&self) -> Result<(), TokenError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = Self::load(&self.path)?;
        entries.remove(TOKEN_KEY);
        Self::save(&self.path, &entries)
    }
}

/// 纯内存实现，用于测试和不需要落盘的宿主
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, token: &str) -> Result<(), TokenError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), TokenError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
