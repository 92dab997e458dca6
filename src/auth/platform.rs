use async_trait::async_trait;

use super::errors::{AuthError, Result};

/// 宿主平台的静默登录能力（原小程序环境里的 wx.login）
#[async_trait]
pub trait PlatformAuth: Send + Sync {
    /// 换取一次性的平台登录 code
    async fn login_code(&self) -> Result<String>;
}

/// 固定 code 的实现，由 CLI 参数注入
#[derive(Debug, Clone)]
pub struct StaticPlatformAuth {
    code: String,
}

impl StaticPlatformAuth {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[async_trait]
impl PlatformAuth for StaticPlatformAuth {
    async fn login_code(&self) -> Result<String> {
        Ok(self.code.clone())
    }
}

/// 宿主不支持静默登录时的实现
#[derive(Debug, Clone, Default)]
pub struct UnsupportedPlatformAuth;

#[async_trait]
impl PlatformAuth for UnsupportedPlatformAuth {
    async fn login_code(&self) -> Result<String> {
        Err(AuthError::Platform("当前宿主不支持静默登录".to_string()))
    }
}
